use crate::prelude::*;

/// What [`Api::then`] attaches at the end of a chain.
#[derive(Clone, Debug)]
pub enum Successor {
    Single(Api),
    Group(Vec<Api>),
}

impl From<Api> for Successor {
    fn from(value: Api) -> Self {
        Successor::Single(value)
    }
}

impl From<Vec<Api>> for Successor {
    fn from(value: Vec<Api>) -> Self {
        Successor::Group(value)
    }
}

impl<const N: usize> From<[Api; N]> for Successor {
    fn from(value: [Api; N]) -> Self {
        Successor::Group(value.into())
    }
}

impl Api {
    /// Appends `successor` at the tail of this node's chain of single
    /// successors, i.e. at the first node, starting from this one, that has
    /// no single successor yet.
    ///
    /// A single node becomes the tail's successor; a group becomes the tail's
    /// fan-out group, replacing any group already there. Because a group does
    /// not extend the chain, `a.then([x, y]).then(c)` leaves `a` with both a
    /// group and a single successor: `x` and `y` run first, then `c` receives
    /// their merged result.
    ///
    /// `a.then(b).then(c)` and `a.then(b.then(c))` build the same chain.
    /// The chain must be acyclic.
    pub fn then(self, successor: impl Into<Successor>) -> Self {
        let mut tail = self.clone();
        loop {
            let next = tail.state().next_api.clone();
            match next {
                Some(next) => tail = next,
                None => break,
            }
        }

        match successor.into() {
            Successor::Single(next) => {
                tail.state().next_api = Some(next);
            }
            Successor::Group(group) if !group.is_empty() => {
                tail.state().next_api_list = Some(group);
            }
            Successor::Group(_) => {}
        }
        self
    }

    /// [`Api::then`] with a fan-out group collected from `nodes`.
    pub fn then_all(self, nodes: impl IntoIterator<Item = Api>) -> Self {
        self.then(nodes.into_iter().collect::<Vec<_>>())
    }
}
