//! Ordered dependency sets.

use rustc_hash::FxHashSet;

use crate::TemplateName;

/// Names a top-level template references, directly or through nested tags.
///
/// Keeps insertion order and rejects duplicates. Rebuilt from scratch each
/// time the owning template is generated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencySet {
    order: Vec<TemplateName>,
    seen: FxHashSet<TemplateName>,
}

impl DependencySet {
    pub fn new() -> Self {
        DependencySet::default()
    }

    /// Insert `name`, returning `false` if it was already present.
    pub fn insert(&mut self, name: TemplateName) -> bool {
        if self.seen.insert(name.clone()) {
            self.order.push(name);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, name: &TemplateName) -> bool {
        self.seen.contains(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TemplateName> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type Item = &'a TemplateName;
    type IntoIter = std::slice::Iter<'a, TemplateName>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<TemplateName> for DependencySet {
    fn from_iter<I: IntoIterator<Item = TemplateName>>(iter: I) -> Self {
        let mut set = DependencySet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}
