use std::collections::HashMap;

use super::{
    grammar::{concat_production, push_unique, EPSILON_INDEX},
    Grammar,
};

impl Grammar {
    /// Removes direct and indirect left recursion, walking nonterminals in
    /// declaration order. Only nonterminals present before the call are
    /// processed; the primed ones it creates are already recursion free.
    pub fn eliminate_left_recursion(&mut self) {
        let order = self.order.clone();
        let mut primes: HashMap<usize, usize> = HashMap::new();

        for (i, &nt) in order.iter().enumerate() {
            // Substituting an epsilon alternative exposes the next symbol, which
            // may be an earlier nonterminal again, so sweep until none is left.
            let mut substituted = true;
            while substituted {
                substituted = false;
                for &replace in &order[..i] {
                    let old_productions = self.take_productions(nt);
                    let mut productions: Vec<Vec<usize>> = Vec::new();
                    for production in old_productions {
                        if production.first() == Some(&replace) {
                            substituted = true;
                            for prefix in self.productions(replace) {
                                push_unique(
                                    &mut productions,
                                    concat_production(prefix, &production[1..]),
                                );
                            }
                        } else {
                            push_unique(&mut productions, production);
                        }
                    }
                    self.set_productions(nt, productions);
                }
            }

            self.eliminate_immediate_left_recursion(nt, &mut primes);
        }
    }

    fn eliminate_immediate_left_recursion(
        &mut self,
        nt: usize,
        primes: &mut HashMap<usize, usize>,
    ) {
        let (recursive_productions, productions): (Vec<_>, Vec<_>) = self
            .take_productions(nt)
            .into_iter()
            .partition(|production| production.first() == Some(&nt));

        if recursive_productions.is_empty() {
            self.set_productions(nt, productions);
            return;
        }

        let nt_prime = match primes.get(&nt) {
            Some(&idx) => idx,
            None => {
                let name = self.get_symbol_prime_name(format!("{}'", self.get_symbol_name(nt)));
                let idx = self.insert_non_terminal_after(nt, &name);
                primes.insert(nt, idx);
                idx
            }
        };

        let mut new_productions: Vec<Vec<usize>> = Vec::new();
        for mut production in productions {
            if production != [EPSILON_INDEX] {
                production.push(nt_prime);
            }
            push_unique(&mut new_productions, production);
        }
        if new_productions.is_empty() {
            new_productions.push(vec![EPSILON_INDEX]);
        }

        // `A -> A` has an empty tail and contributes nothing.
        let mut prime_productions: Vec<Vec<usize>> = Vec::new();
        for production in recursive_productions {
            let tail = &production[1..];
            if tail.is_empty() {
                continue;
            }
            push_unique(&mut prime_productions, concat_production(tail, &[nt_prime]));
        }
        prime_productions.push(vec![EPSILON_INDEX]);

        self.set_productions(nt, new_productions);
        self.set_productions(nt_prime, prime_productions);
    }
}
