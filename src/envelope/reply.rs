use crate::prelude::*;

/// What a node's envelope holds in place of a raw response.
///
/// A node that made a network call holds a `Single` response. A node with a
/// fan-out group ends up holding the `Group` of its members' replies, one
/// slot per member in send order, `None` for members that made no call.
#[derive(Clone, Debug, PartialEq, Eq, enum_as_inner::EnumAsInner)]
pub enum Reply {
    Single(Arc<NetworkResponse>),
    Group(Vec<Option<Reply>>),
}

impl Reply {
    /// Every response in this reply, depth first, in send order.
    pub fn responses(&self) -> Vec<&NetworkResponse> {
        match self {
            Reply::Single(response) => vec![response.as_ref()],
            Reply::Group(members) => members
                .iter()
                .flatten()
                .flat_map(Reply::responses)
                .collect(),
        }
    }
}

impl From<NetworkResponse> for Reply {
    fn from(value: NetworkResponse) -> Self {
        Reply::Single(Arc::new(value))
    }
}
