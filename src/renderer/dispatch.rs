//! Draw dispatch in construction order.
//!
//! # Algorithm
//!
//! 1. Walk the tree pre-order through its links (no recursion)
//! 2. For each node: call its control's draw callback with `bounds`
//!
//! Parents are drawn before their children and children left to right, so
//! a host painting over earlier output gets natural stacking.

use log::trace;

use crate::engine::LayoutTree;
use crate::error::LayoutError;

impl LayoutTree {
    /// Invoke every node's draw callback with its bounds.
    ///
    /// Passthrough nodes are visited but draw nothing. Bounds are whatever
    /// the last `update_layout()` produced.
    pub fn draw(&self) -> Result<(), LayoutError> {
        if self.building {
            return Err(LayoutError::BuildInProgress);
        }
        if self.arena_size == 0 {
            return Err(LayoutError::EmptyTree);
        }

        let mut drawn = 0_usize;
        for id in self.pre_order() {
            let node = self.arena.node(id);
            node.data.control.draw(node.data.layout.bounds);
            drawn += 1;
        }
        trace!("dispatched {drawn} draw calls");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::config::TreeConfig;
    use crate::engine::LayoutTree;
    use crate::error::LayoutError;
    use crate::types::{Rect, SizePolicy};

    type Log = Rc<RefCell<Vec<(&'static str, Rect)>>>;

    fn recorder(log: Log, name: &'static str) -> impl Fn(Rect) + 'static {
        move |rect| log.borrow_mut().push((name, rect))
    }

    #[test]
    #[rustfmt::skip]
    fn test_draw_order_is_construction_order() {
        let log: Log = Rc::default();
        let mut tree = LayoutTree::new(TreeConfig::new(8));
        tree.begin_root()
            .set_draw_func(recorder(log.clone(), "root"))
            .begin()
                .set_draw_func(recorder(log.clone(), "a"))
                .begin().set_draw_func(recorder(log.clone(), "a.1")).end()
            .end()
            .begin()
                .set_draw_func(recorder(log.clone(), "b"))
            .end()
            .end_root()
            .unwrap();

        tree.update_layout(10.0, 10.0).unwrap();
        tree.draw().unwrap();

        let names: Vec<_> = log.borrow().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["root", "a", "a.1", "b"]);
    }

    #[test]
    #[rustfmt::skip]
    fn test_draw_receives_resolved_bounds() {
        let log: Log = Rc::default();
        let mut tree = LayoutTree::new(TreeConfig::new(4));
        tree.begin_root()
            .set_padding_all(1.0)
            .begin()
                .set_size_policy(SizePolicy::Fixed)
                .set_dimensions(3.0, 2.0)
                .set_draw_func(recorder(log.clone(), "leaf"))
            .end()
            .end_root()
            .unwrap();

        tree.update_layout(10.0, 10.0).unwrap();
        tree.draw().unwrap();
        assert_eq!(log.borrow().as_slice(), &[("leaf", Rect::new(1.0, 1.0, 3.0, 2.0))]);
    }

    #[test]
    fn test_passthrough_nodes_draw_nothing() {
        let log: Log = Rc::default();
        let mut tree = LayoutTree::new(TreeConfig::new(4));
        tree.begin_root().begin().end().end_root().unwrap();
        tree.draw().unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_draw_requires_a_built_tree() {
        let mut tree = LayoutTree::new(TreeConfig::new(4));
        assert_eq!(tree.draw(), Err(LayoutError::EmptyTree));

        tree.begin_root();
        assert_eq!(tree.draw(), Err(LayoutError::BuildInProgress));
        tree.end_root().unwrap();
        assert!(tree.draw().is_ok());
    }
}
