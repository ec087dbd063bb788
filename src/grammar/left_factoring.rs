use std::collections::{HashMap, VecDeque};

use super::{
    grammar::{concat_production, push_unique, EPSILON_INDEX},
    Grammar,
};

/// Supplies names for the nonterminals introduced by left factoring.
///
/// Names are the base followed by a counter that starts at 1 and only moves
/// forward, so one instance can be threaded through several runs. Names
/// already present in the grammar are skipped.
#[derive(Debug, Clone)]
pub struct FreshNames {
    base: String,
    next: usize,
}

impl FreshNames {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.to_string(),
            next: 1,
        }
    }

    pub fn next_name(&mut self, g: &Grammar) -> String {
        loop {
            let name = format!("{}{}", self.base, self.next);
            self.next += 1;
            if g.get_symbol_index(&name).is_none() {
                return name;
            }
        }
    }
}

fn common_prefix_len(a: &[usize], b: &[usize]) -> usize {
    a.iter()
        .zip(b.iter())
        .take_while(|(x, y)| x == y && **x != EPSILON_INDEX)
        .count()
}

impl Grammar {
    /// Left factors every nonterminal, naming new nonterminals after the
    /// start symbol.
    pub fn left_factor(&mut self) {
        let base = match self.start_symbol {
            Some(start) => self.get_symbol_name(start).to_string(),
            None => return,
        };
        self.left_factor_with(&mut FreshNames::new(&base));
    }

    pub fn left_factor_with(&mut self, fresh: &mut FreshNames) {
        let mut pending: VecDeque<(usize, Vec<Vec<usize>>)> = self
            .order
            .iter()
            .map(|&nt| (nt, self.productions(nt).to_vec()))
            .collect();
        let mut factored: HashMap<usize, Vec<Vec<usize>>> = HashMap::new();
        let mut last_child: HashMap<usize, usize> = HashMap::new();

        while let Some((nt, mut productions)) = pending.pop_front() {
            let output = factored.entry(nt).or_default();

            if productions.len() <= 1 {
                output.extend(productions);
                continue;
            }

            while !productions.is_empty() {
                let mut group = vec![productions.remove(0)];
                for i in (0..productions.len()).rev() {
                    if common_prefix_len(&group[0], &productions[i]) > 0 {
                        group.push(productions.remove(i));
                    }
                }

                // Membership only compared against the representative, so the
                // shared prefix may be shorter than any pairwise one.
                let prefix_len = group[1..].iter().fold(group[0].len(), |len, production| {
                    common_prefix_len(&group[0][..len], production)
                });

                if group.len() > 1 && prefix_len > 0 {
                    let name = fresh.next_name(self);
                    let anchor = last_child.get(&nt).cloned().unwrap_or(nt);
                    let new_nt = self.insert_non_terminal_after(anchor, &name);
                    last_child.insert(nt, new_nt);

                    let mut production = group[0][..prefix_len].to_vec();
                    production.push(new_nt);
                    output.push(production);

                    let mut suffixes: Vec<Vec<usize>> = Vec::new();
                    for production in &group {
                        push_unique(&mut suffixes, concat_production(&[], &production[prefix_len..]));
                    }
                    pending.push_back((new_nt, suffixes));
                } else {
                    output.extend(group);
                }
            }
        }

        for (nt, productions) in factored {
            self.set_productions(nt, productions);
        }
    }
}
