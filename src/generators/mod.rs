//! src/generators/mod.rs
//!
//! Composable random generators with integrated shrinking.
//!
//! A [`Gen`] is a function from a random source to a shrink [`Tree`].
//! Generators are combined with plain functions ([`zip`], [`vec_of`],
//! [`frequency`], ...) and methods ([`Gen::map`], [`Gen::and_then`]).
use crate::error::GenerationError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::rc::Rc;
use std::sync::Arc;

pub mod tree;
pub mod word_count;

pub use tree::Tree;

type GenFn<T> = dyn Fn(&mut StdRng) -> Result<Tree<T>, GenerationError> + Send + Sync;

pub struct Gen<T> {
    run: Arc<GenFn<T>>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            run: Arc::clone(&self.run),
        }
    }
}

impl<T: 'static> Gen<T> {
    pub fn from_fn(
        f: impl Fn(&mut StdRng) -> Result<Tree<T>, GenerationError> + Send + Sync + 'static,
    ) -> Self {
        Gen { run: Arc::new(f) }
    }

    pub fn generate(&self, rng: &mut StdRng) -> Result<Tree<T>, GenerationError> {
        (self.run)(rng)
    }

    /// Draws a single value, discarding its shrinks.
    pub fn sample(&self, rng: &mut StdRng) -> Result<T, GenerationError> {
        self.generate(rng).map(Tree::into_value)
    }

    pub fn map<U: 'static>(self, f: impl Fn(&T) -> U + Send + Sync + 'static) -> Gen<U> {
        let f = Arc::new(f);
        Gen::from_fn(move |rng| {
            let f = Arc::clone(&f);
            let tree = self.generate(rng)?;
            Ok(tree.map(Rc::new(move |value: &T| f(value))))
        })
    }

    /// Generates a value, then feeds it to `f` to pick the next generator.
    ///
    /// The second stage is driven by its own seed, so shrinking the first
    /// value replays the second stage deterministically.
    pub fn and_then<U: 'static>(self, f: impl Fn(&T) -> Gen<U> + Send + Sync + 'static) -> Gen<U> {
        let f: Arc<dyn Fn(&T) -> Gen<U> + Send + Sync> = Arc::new(f);
        Gen::from_fn(move |rng| {
            let seed: u64 = rng.random();
            let outer = self.generate(rng)?;
            bind(outer, Arc::clone(&f), seed)
        })
    }
}

fn bind<T: 'static, U: 'static>(
    outer: Tree<T>,
    f: Arc<dyn Fn(&T) -> Gen<U> + Send + Sync>,
    seed: u64,
) -> Result<Tree<U>, GenerationError> {
    let inner = f(outer.value()).generate(&mut StdRng::seed_from_u64(seed))?;
    Ok(inner.with_leading_children(move || {
        // Candidates whose second stage fails to generate are not shrinks.
        outer
            .children()
            .into_iter()
            .filter_map(|child| bind(child, Arc::clone(&f), seed).ok())
            .collect()
    }))
}

pub fn constant<T: Clone + Send + Sync + 'static>(value: T) -> Gen<T> {
    Gen::from_fn(move |_| Ok(Tree::leaf(value.clone())))
}

fn failing<T: 'static>(error: GenerationError) -> Gen<T> {
    Gen::from_fn(move |_| Err(error.clone()))
}

/// Integers in the closed range `[low, high]`, shrinking toward `low`.
pub fn bounded(low: u64, high: u64) -> Gen<u64> {
    Gen::from_fn(move |rng| {
        if low > high {
            return Err(GenerationError::InvalidBound {
                low: low.into(),
                high: high.into(),
            });
        }
        Ok(tree::integral(rng.random_range(low..=high), low))
    })
}

/// Picks one of `items`, shrinking toward the earlier entries.
pub fn element_of<T: Clone + Send + Sync + 'static>(items: Vec<T>) -> Gen<T> {
    let items = Arc::new(items);
    Gen::from_fn(move |rng| {
        let last = items
            .len()
            .checked_sub(1)
            .ok_or(GenerationError::EmptyChoice("elements"))?;
        let items = Arc::clone(&items);
        let index = tree::integral(rng.random_range(0..=last as u64), 0);
        Ok(index.map(Rc::new(move |i: &u64| items[*i as usize].clone())))
    })
}

/// Picks a generator with probability proportional to its weight.
///
/// Shrinks toward earlier generators with a non-zero weight, replaying the
/// chosen one from the same seed, then within the chosen generator.
pub fn frequency<T: 'static>(weighted: Vec<(u32, Gen<T>)>) -> Gen<T> {
    if weighted.is_empty() {
        return failing(GenerationError::EmptyChoice("generators"));
    }
    let weights: Vec<u64> = weighted.iter().map(|(w, _)| u64::from(*w)).collect();
    let total: u64 = weights.iter().sum();
    if total == 0 {
        return failing(GenerationError::ZeroWeight);
    }
    let generators: Vec<Gen<T>> = weighted.into_iter().map(|(_, g)| g).collect();
    branch(weights, total).and_then(move |index| {
        generators
            .get(*index)
            .cloned()
            .unwrap_or_else(|| failing(GenerationError::EmptyChoice("generators")))
    })
}

fn branch(weights: Vec<u64>, total: u64) -> Gen<usize> {
    let live: Arc<[usize]> = weights
        .iter()
        .enumerate()
        .filter(|(_, w)| **w > 0)
        .map(|(i, _)| i)
        .collect();
    Gen::from_fn(move |rng| {
        let mut pick = rng.random_range(0..total);
        let mut index = 0;
        for (i, weight) in weights.iter().enumerate() {
            if pick < *weight {
                index = i;
                break;
            }
            pick -= weight;
        }
        Ok(choice(index, Rc::from(&*live)))
    })
}

fn choice(index: usize, live: Rc<[usize]>) -> Tree<usize> {
    Tree::new(index, move || {
        live.iter()
            .take_while(|i| **i < index)
            .map(|i| choice(*i, Rc::clone(&live)))
            .collect()
    })
}

pub fn zip<A, B>(left: Gen<A>, right: Gen<B>) -> Gen<(A, B)>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    Gen::from_fn(move |rng| Ok(tree::pair(left.generate(rng)?, right.generate(rng)?)))
}

/// Lists with a length in `[min_len, max_len]`.
pub fn vec_of<T: Clone + 'static>(element: Gen<T>, min_len: usize, max_len: usize) -> Gen<Vec<T>> {
    Gen::from_fn(move |rng| {
        if min_len > max_len {
            return Err(GenerationError::InvalidBound {
                low: min_len as i128,
                high: max_len as i128,
            });
        }
        let len = rng.random_range(min_len..=max_len);
        let items = (0..len)
            .map(|_| element.generate(rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tree::list(items, min_len))
    })
}

pub fn string_of(chars: Gen<char>, min_len: usize, max_len: usize) -> Gen<String> {
    vec_of(chars, min_len, max_len).map(|chars| chars.iter().collect())
}
