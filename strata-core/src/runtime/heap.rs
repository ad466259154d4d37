//! Heap snapshot: every object allocated during evaluation plus the
//! global bindings that point into it.

use super::object::Object;
use serde::Serialize;
use std::collections::BTreeMap;
use strata_config::Token;

/// Index of an object in the heap arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ObjectId(pub usize);

/// Evaluated program state
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Heap {
    objects: Vec<Object>,
    globals: BTreeMap<Token, ObjectId>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an object and return its id
    pub fn alloc(&mut self, object: Object) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    /// Allocate `object` and bind `token` to it (rebinding replaces the old binding)
    pub fn assign(&mut self, token: Token, object: Object) -> ObjectId {
        let id = self.alloc(object);
        self.globals.insert(token, id);
        id
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0)
    }

    /// Current value of a global
    pub fn get(&self, token: &str) -> Option<&Object> {
        self.globals.get(token).and_then(|id| self.object(*id))
    }

    pub fn globals(&self) -> impl Iterator<Item = (&Token, &Object)> {
        self.globals
            .iter()
            .filter_map(|(tok, id)| self.object(*id).map(|obj| (tok, obj)))
    }

    /// Number of allocated objects (including ones no longer bound)
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
