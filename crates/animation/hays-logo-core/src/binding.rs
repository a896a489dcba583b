//! Handle table and resolver trait.
//!
//! The table maps target names (as used by tracks) to host handles. A target with
//! no handle yet (asset still loading) is simply absent; the sequencer skips it and
//! the adapter retries binding on a later tick.

use hashbrown::HashMap;

/// Resolves target names to host handles. Adapters (Bevy/WASM) implement this and
/// pass it into [`HandleTable::bind_with`].
pub trait TargetResolver {
    type Handle;
    fn resolve(&mut self, name: &str) -> Option<Self::Handle>;
}

/// Explicit handle table indexed by target name.
#[derive(Clone, Debug)]
pub struct HandleTable<H> {
    targets: Vec<String>,
    handles: HashMap<String, H>,
}

impl<H> Default for HandleTable<H> {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            handles: HashMap::new(),
        }
    }
}

impl<H> HandleTable<H> {
    /// Create a table expecting the given target names.
    pub fn with_targets<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            handles: HashMap::new(),
        }
    }

    /// Insert or replace the handle for a target.
    pub fn bind(&mut self, name: impl Into<String>, handle: H) -> Option<H> {
        let name = name.into();
        if !self.targets.contains(&name) {
            self.targets.push(name.clone());
        }
        self.handles.insert(name, handle)
    }

    /// Drop the handle for a target (e.g. its entity despawned). The target stays expected.
    pub fn unbind(&mut self, name: &str) -> Option<H> {
        self.handles.remove(name)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&H> {
        self.handles.get(name)
    }

    #[inline]
    pub fn is_bound(&self, name: &str) -> bool {
        self.handles.contains_key(name)
    }

    /// Expected targets that have no handle yet.
    pub fn unbound(&self) -> impl Iterator<Item = &str> {
        self.targets
            .iter()
            .filter(|t| !self.handles.contains_key(t.as_str()))
            .map(String::as_str)
    }

    /// Bound targets and their handles.
    pub fn iter_bound(&self) -> impl Iterator<Item = (&str, &H)> {
        self.handles.iter().map(|(n, h)| (n.as_str(), h))
    }

    pub fn is_complete(&self) -> bool {
        self.unbound().next().is_none()
    }

    /// Try to resolve every still-unbound target. Returns the number newly bound.
    pub fn bind_with<R>(&mut self, resolver: &mut R) -> usize
    where
        R: TargetResolver<Handle = H>,
    {
        let pending: Vec<String> = self.unbound().map(str::to_owned).collect();
        let mut bound = 0;
        for name in pending {
            if let Some(handle) = resolver.resolve(&name) {
                log::debug!("bound target '{name}'");
                self.handles.insert(name, handle);
                bound += 1;
            }
        }
        bound
    }

    pub fn clear(&mut self) {
        self.handles.clear();
    }
}
