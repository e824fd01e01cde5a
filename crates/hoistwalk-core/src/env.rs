//! Lexical environment chain
//!
//! An [`Env`] frame records the names one scope makes visible and borrows
//! the frame of the enclosing scope. Lookups fall through to the parent
//! when a name is not declared locally.

#[derive(Debug, Default)]
pub struct Env<'p> {
    names: Vec<String>,
    parent: Option<&'p Env<'p>>,
}

impl<'p> Env<'p> {
    /// An empty frame with no parent.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut env = Self::root();
        env.declare_all(names);
        env
    }

    /// A new empty frame chained on top of this one.
    pub fn child(&self) -> Env<'_> {
        Env {
            names: Vec::new(),
            parent: Some(self),
        }
    }

    pub fn declare(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.declares(&name) {
            self.names.push(name);
        }
    }

    pub fn declare_all<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.declare(name);
        }
    }

    /// Whether this frame itself declares `name`.
    pub fn declares(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Whether `name` is visible from this frame.
    pub fn contains(&self, name: &str) -> bool {
        self.frames().any(|frame| frame.declares(name))
    }

    /// Names declared by this frame, in registration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn parent(&self) -> Option<&'p Env<'p>> {
        self.parent
    }

    pub fn depth(&self) -> usize {
        self.frames().count() - 1
    }

    /// Every visible name, innermost frame first, without repeats.
    pub fn visible(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for frame in self.frames() {
            for name in &frame.names {
                if !seen.contains(&name.as_str()) {
                    seen.push(name);
                }
            }
        }
        seen
    }

    fn frames(&self) -> impl Iterator<Item = &Env<'_>> {
        std::iter::successors(Some(self), |frame| frame.parent)
    }
}
