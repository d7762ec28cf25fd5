use crate::prelude::*;

/// Values that leave a node's field untouched when passed to its setter.
pub trait IsBlank {
    fn is_blank(&self) -> bool;
}

impl IsBlank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl IsBlank for u16 {
    fn is_blank(&self) -> bool {
        *self == 0
    }
}

impl<K, V> IsBlank for HashMap<K, V> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl IsBlank for Body {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}
