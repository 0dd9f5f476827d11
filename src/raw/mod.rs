mod order;
mod render_guard;

pub(crate) use order::RawOrder;
pub(crate) use render_guard::RenderGuard;
