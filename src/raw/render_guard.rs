use std::cell::RefCell;

thread_local!(static RENDERING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) });

/// Marks a container as being rendered on the current thread.
///
/// While a guard for an address is alive, [`RenderGuard::enter`] returns
/// `None` for that address, so a container reached again through one of its
/// own values can print a placeholder instead of recursing.
#[derive(Debug)]
pub(crate) struct RenderGuard {
    addr: usize,
}

impl RenderGuard {
    pub(crate) fn enter(addr: usize) -> Option<Self> {
        RENDERING.with(|rendering| {
            let mut rendering = rendering.borrow_mut();
            if rendering.contains(&addr) {
                return None;
            }
            rendering.push(addr);
            Some(Self { addr })
        })
    }
}

impl Drop for RenderGuard {
    fn drop(&mut self) {
        RENDERING.with(|rendering| {
            let mut rendering = rendering.borrow_mut();
            if let Some(index) = rendering.iter().rposition(|&addr| addr == self.addr) {
                rendering.swap_remove(index);
            }
        });
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn reentry_is_refused_until_dropped() {
        let outer = RenderGuard::enter(0x10).unwrap();
        assert!(RenderGuard::enter(0x10).is_none());

        let other = RenderGuard::enter(0x20).unwrap();
        drop(other);

        drop(outer);
        assert!(RenderGuard::enter(0x10).is_some());
    }

    #[test]
    fn guards_are_per_thread() {
        let _guard = RenderGuard::enter(0x30).unwrap();
        let entered = std::thread::spawn(|| RenderGuard::enter(0x30).is_some()).join().unwrap();
        assert!(entered);
    }
}
