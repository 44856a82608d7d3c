use core::num::NonZero;
use core::sync::atomic::{AtomicUsize, Ordering};

static NEXT: AtomicUsize = AtomicUsize::new(1);

/// Identity of one tree instance, used to reject positions taken from another tree.
///
/// A tree gets a fresh identity when it is created, cloned or cleared, so positions that
/// predate those events stop matching.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct TreeId(NonZero<usize>);

impl TreeId {
    pub(crate) fn next() -> Self {
        let id = NEXT.fetch_add(1, Ordering::Relaxed);
        Self(NonZero::new(id).expect("`TreeId::next()` - identity counter overflowed!"))
    }
}
