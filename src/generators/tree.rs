//! src/generators/tree.rs
use std::rc::Rc;

type Children<T> = Rc<dyn Fn() -> Vec<Tree<T>>>;

/// A generated value together with its lazily expanded shrink candidates.
///
/// Children are ordered from most to least aggressive; every child is itself
/// a tree, so a shrunk value can keep shrinking.
pub struct Tree<T> {
    value: T,
    children: Children<T>,
}

impl<T: Clone> Clone for Tree<T> {
    fn clone(&self) -> Self {
        Tree {
            value: self.value.clone(),
            children: Rc::clone(&self.children),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Tree").field(&self.value).finish()
    }
}

impl<T: 'static> Tree<T> {
    pub fn leaf(value: T) -> Self {
        Tree {
            value,
            children: Rc::new(Vec::new),
        }
    }

    pub fn new(value: T, children: impl Fn() -> Vec<Tree<T>> + 'static) -> Self {
        Tree {
            value,
            children: Rc::new(children),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn children(&self) -> Vec<Tree<T>> {
        (self.children)()
    }

    /// Tries `first` before this tree's own shrinks.
    pub fn with_leading_children(self, first: impl Fn() -> Vec<Tree<T>> + 'static) -> Tree<T> {
        let rest = self.children;
        Tree::new(self.value, move || {
            let mut children = first();
            children.extend(rest());
            children
        })
    }

    pub fn map<U: 'static>(&self, f: Rc<dyn Fn(&T) -> U>) -> Tree<U> {
        let value = f(&self.value);
        let children = Rc::clone(&self.children);
        Tree::new(value, move || {
            children()
                .iter()
                .map(|child| child.map(Rc::clone(&f)))
                .collect()
        })
    }
}

/// Shrinks `value` toward `origin`: the origin first, then halving the
/// remaining distance, ending one step away from `value`.
pub fn integral(value: u64, origin: u64) -> Tree<u64> {
    Tree::new(value, move || {
        towards(origin, value)
            .into_iter()
            .map(|candidate| integral(candidate, origin))
            .collect()
    })
}

fn towards(origin: u64, value: u64) -> Vec<u64> {
    if value <= origin {
        return vec![];
    }
    let mut candidates = vec![origin];
    let mut diff = (value - origin) / 2;
    while diff > 0 {
        candidates.push(value - diff);
        diff /= 2;
    }
    candidates
}

pub fn pair<A, B>(left: Tree<A>, right: Tree<B>) -> Tree<(A, B)>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    let value = (left.value.clone(), right.value.clone());
    Tree::new(value, move || {
        let mut children: Vec<Tree<(A, B)>> = left
            .children()
            .into_iter()
            .map(|l| pair(l, right.clone()))
            .collect();
        children.extend(right.children().into_iter().map(|r| pair(left.clone(), r)));
        children
    })
}

/// Combines element trees into a list tree.
///
/// Shrinks by truncating to `min_len`, dropping either half, dropping single
/// elements, then shrinking individual elements in place.
pub fn list<T: Clone + 'static>(items: Vec<Tree<T>>, min_len: usize) -> Tree<Vec<T>> {
    let value = items.iter().map(|item| item.value.clone()).collect();
    Tree::new(value, move || {
        let len = items.len();
        let mut children = Vec::new();
        if len > min_len {
            if min_len < len / 2 {
                children.push(list(items[..min_len].to_vec(), min_len));
            }
            let half = len / 2;
            if half > 1 && len - half >= min_len {
                children.push(list(items[half..].to_vec(), min_len));
                children.push(list(items[..len - half].to_vec(), min_len));
            }
            for skip in 0..len {
                let rest = items
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != skip)
                    .map(|(_, item)| item.clone())
                    .collect();
                children.push(list(rest, min_len));
            }
        }
        for (i, item) in items.iter().enumerate() {
            for smaller in item.children() {
                let mut replaced = items.clone();
                replaced[i] = smaller;
                children.push(list(replaced, min_len));
            }
        }
        children
    })
}
