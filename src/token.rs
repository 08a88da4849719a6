//! Subscription handles.

/// A subscription handle: a slot index inside the topic that issued it.
///
/// Tokens are not globally unique — they are only meaningful when paired
/// with the topic that returned them from `subscribe`. Passing a token to a
/// different topic than the one that issued it will silently address
/// whatever subscriber happens to occupy that slot index there, if any.
pub type Token = usize;
