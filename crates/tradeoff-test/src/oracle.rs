//! Exhaustive brute-force answers, usable as a reference on small instances.
//!
//! Every function enumerates the full assignment space, so keep instances
//! to a handful of Pros and Cons.

use tradeoff_core::{Delta, Instance, MatchMode};

/// Whether any explanation exists under `mode`.
pub fn feasible(mode: MatchMode, instance: &Instance) -> bool {
    match mode {
        MatchMode::OneToOne => one_to_one(instance),
        MatchMode::OneToMany => one_to_many(instance),
        MatchMode::ManyToOne => min_pairs(instance).is_some(),
        MatchMode::Combined => min_groups(instance).is_some(),
    }
}

/// Some distinct Pro per Con, each pair balanced on its own.
pub fn one_to_one(instance: &Instance) -> bool {
    let (pros, cons) = values(instance);
    if let Some(trivial) = one_sided(&pros, &cons) {
        return trivial;
    }
    let mut feasible = false;
    for_each_tuple(cons.len(), pros.len(), |pick| {
        let mut seen = vec![false; pros.len()];
        let injective = pick.iter().all(|&p| !std::mem::replace(&mut seen[p], true));
        if injective && pick.iter().zip(&cons).all(|(&p, &c)| (pros[p] + c).is_balanced()) {
            feasible = true;
        }
    });
    feasible
}

/// Every Con assigned to one Pro; every Pro's group balanced.
pub fn one_to_many(instance: &Instance) -> bool {
    let (pros, cons) = values(instance);
    if let Some(trivial) = one_sided(&pros, &cons) {
        return trivial;
    }
    let mut feasible = false;
    for_each_tuple(cons.len(), pros.len(), |pick| {
        let mut balances = pros.clone();
        for (&p, &c) in pick.iter().zip(&cons) {
            balances[p] += c;
        }
        if balances.iter().all(Delta::is_balanced) {
            feasible = true;
        }
    });
    feasible
}

/// Fewest (Pro, Con) pairs over ManyToOne explanations.
pub fn min_pairs(instance: &Instance) -> Option<usize> {
    let (pros, cons) = values(instance);
    if let Some(trivial) = one_sided(&pros, &cons) {
        return trivial.then_some(0);
    }
    let mut best: Option<usize> = None;
    // role 0: unused; role j + 1: covers Con j
    for_each_tuple(pros.len(), cons.len() + 1, |roles| {
        let covered = (0..cons.len()).all(|j| {
            let group: Vec<Delta> = (0..pros.len())
                .filter(|&p| roles[p] == j + 1)
                .map(|p| pros[p])
                .collect();
            !group.is_empty() && (group.iter().sum::<Delta>() + cons[j]).is_balanced()
        });
        if covered {
            let pairs = roles.iter().filter(|&&r| r > 0).count();
            best = Some(best.map_or(pairs, |b| b.min(pairs)));
        }
    });
    best
}

/// Fewest groups (leaders plus ManyToOne targets) over Combined explanations.
pub fn min_groups(instance: &Instance) -> Option<usize> {
    let (pros, cons) = values(instance);
    if let Some(trivial) = one_sided(&pros, &cons) {
        return trivial.then_some(0);
    }
    let mut best: Option<usize> = None;
    // role 0: unused; role 1: leader; role j + 2: absorbed into Con j
    for_each_tuple(pros.len(), cons.len() + 2, |roles| {
        let mut targets = 0;
        let mut free = Vec::new();
        for j in 0..cons.len() {
            let group: Vec<Delta> = (0..pros.len())
                .filter(|&p| roles[p] == j + 2)
                .map(|p| pros[p])
                .collect();
            if group.is_empty() {
                free.push(j);
            } else if (group.iter().sum::<Delta>() + cons[j]).is_balanced() {
                targets += 1;
            } else {
                return;
            }
        }
        let leaders: Vec<usize> = (0..pros.len()).filter(|&p| roles[p] == 1).collect();
        if free.is_empty() {
            best = Some(best.map_or(targets, |b| b.min(targets)));
            return;
        }
        for_each_tuple(free.len(), leaders.len(), |pick| {
            let mut balances: Vec<Delta> = leaders.iter().map(|&p| pros[p]).collect();
            for (&l, &j) in pick.iter().zip(&free) {
                balances[l] += cons[j];
            }
            if balances.iter().all(Delta::is_balanced) {
                let mut active = pick.to_vec();
                active.sort_unstable();
                active.dedup();
                let groups = targets + active.len();
                best = Some(best.map_or(groups, |b| b.min(groups)));
            }
        });
    });
    best
}

fn values(instance: &Instance) -> (Vec<Delta>, Vec<Delta>) {
    (
        instance.pros().iter().map(|c| c.value()).collect(),
        instance.cons().iter().map(|c| c.value()).collect(),
    )
}

/// Both sides empty is explained by nothing; one empty side never is.
fn one_sided(pros: &[Delta], cons: &[Delta]) -> Option<bool> {
    match (pros.is_empty(), cons.is_empty()) {
        (true, true) => Some(true),
        (true, false) | (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Calls `f` with every tuple in `0..base` of length `len`.
fn for_each_tuple(len: usize, base: usize, mut f: impl FnMut(&[usize])) {
    if base == 0 {
        if len == 0 {
            f(&[]);
        }
        return;
    }
    let mut tuple = vec![0; len];
    loop {
        f(&tuple);
        let mut i = 0;
        loop {
            if i == len {
                return;
            }
            tuple[i] += 1;
            if tuple[i] < base {
                break;
            }
            tuple[i] = 0;
            i += 1;
        }
    }
}
