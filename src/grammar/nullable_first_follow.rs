use std::collections::{HashMap, HashSet};

use super::{
    grammar::{Symbol, END_MARK_INDEX},
    Grammar,
};
use crate::Error;

/// FIRST of a single symbol: the terminals it can start with, and whether it
/// can derive epsilon.
type First = (HashSet<usize>, bool);

impl Grammar {
    pub fn reset_nullable_first_follow(&mut self) {
        for nt in self.non_terminal_iter_mut() {
            nt.nullable = false;
            nt.first = HashSet::new();
            nt.follow = HashSet::new();
        }
    }

    /// Fills `first` and `nullable` of every nonterminal.
    ///
    /// The grammar must be free of left recursion, including recursion hidden
    /// behind nullable prefixes. Otherwise `Error::LeftRecursion` names the
    /// nonterminal that was re-entered.
    pub fn calculate_first(&mut self) -> Result<(), Error> {
        self.reset_nullable_first_follow();
        let mut memo: HashMap<usize, First> = HashMap::new();
        let mut visiting: HashSet<usize> = HashSet::new();
        for &nt in &self.order {
            self.first_of_symbol(nt, &mut memo, &mut visiting)?;
        }

        for (idx, (first, nullable)) in memo {
            if let Some(nt) = self.symbols[idx].mut_non_terminal() {
                nt.first = first;
                nt.nullable = nullable;
            }
        }
        Ok(())
    }

    fn first_of_symbol(
        &self,
        idx: usize,
        memo: &mut HashMap<usize, First>,
        visiting: &mut HashSet<usize>,
    ) -> Result<First, Error> {
        let nt = match &self.symbols[idx] {
            Symbol::Epsilon => return Ok((HashSet::new(), true)),
            Symbol::Terminal(_) => return Ok((HashSet::from([idx]), false)),
            Symbol::NonTerminal(nt) => nt,
        };
        if let Some(first) = memo.get(&idx) {
            return Ok(first.clone());
        }
        if !visiting.insert(idx) {
            return Err(Error::LeftRecursion(nt.name.clone()));
        }

        let mut first: HashSet<usize> = HashSet::new();
        let mut nullable = false;
        for production in &nt.productions {
            let mut all_nullable = true;
            for &symbol in production {
                let (sub_first, sub_nullable) = self.first_of_symbol(symbol, memo, visiting)?;
                first.extend(sub_first);
                if !sub_nullable {
                    all_nullable = false;
                    break;
                }
            }
            nullable |= all_nullable;
        }

        visiting.remove(&idx);
        memo.insert(idx, (first.clone(), nullable));
        Ok((first, nullable))
    }

    /// FIRST of a symbol sequence from the already computed FIRST sets.
    /// An empty sequence is nullable.
    pub fn first_of_sequence(&self, production: &[usize]) -> (HashSet<usize>, bool) {
        let mut first: HashSet<usize> = HashSet::new();
        for &idx in production {
            match &self.symbols[idx] {
                Symbol::Epsilon => continue,
                Symbol::Terminal(_) => {
                    first.insert(idx);
                    return (first, false);
                }
                Symbol::NonTerminal(nt) => {
                    first.extend(nt.first.iter().cloned());
                    if !nt.nullable {
                        return (first, false);
                    }
                }
            }
        }
        (first, true)
    }

    /// Computes FIRST, then FOLLOW by iterating until no set grows.
    pub fn calculate_nullable_first_follow(&mut self) -> Result<(), Error> {
        self.calculate_first()?;
        self.calculate_follow();
        Ok(())
    }

    fn calculate_follow(&mut self) {
        let Some(start_idx) = self.start_symbol else {
            return;
        };
        if let Some(start) = self.symbols[start_idx].mut_non_terminal() {
            start.follow.insert(END_MARK_INDEX);
        }

        let order = self.order.clone();
        let mut changed = true;
        while changed {
            changed = false;
            for &left in &order {
                for production in self.productions(left).to_vec() {
                    for (i, &b) in production.iter().enumerate() {
                        if !self.is_non_terminal(b) {
                            continue;
                        }
                        let (mut follow, nullable) = self.first_of_sequence(&production[i + 1..]);
                        if nullable {
                            if let Some(left) = self.symbols[left].non_terminal() {
                                follow.extend(left.follow.iter().cloned());
                            }
                        }

                        if let Some(nt) = self.symbols[b].mut_non_terminal() {
                            let before = nt.follow.len();
                            nt.follow.extend(follow);
                            changed |= nt.follow.len() > before;
                        }
                    }
                }
            }
        }
    }
}
