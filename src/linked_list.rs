//! Intrusive doubly linked list with weak back-links (C3).
//!
//! Ported from `original_source/lib/debian/_deb822_repro/_util.py`'s
//! `LinkedList`/`LinkedListNode`: nodes hold a strong `next` and a weak
//! `previous` so a caller may keep a node reference without extending its
//! lifetime past removal from the list. Used only by the duplicate-tolerant
//! paragraph (§4.7) to order key-value pairs that share a field name.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub struct LinkedListNode<T> {
    previous: RefCell<Weak<LinkedListNode<T>>>,
    next: RefCell<Option<Rc<LinkedListNode<T>>>>,
    pub value: RefCell<T>,
}

impl<T> LinkedListNode<T> {
    fn new(value: T) -> Rc<Self> {
        Rc::new(LinkedListNode {
            previous: RefCell::new(Weak::new()),
            next: RefCell::new(None),
            value: RefCell::new(value),
        })
    }

    pub fn previous_node(self: &Rc<Self>) -> Option<Rc<Self>> {
        self.previous.borrow().upgrade()
    }

    pub fn next_node(self: &Rc<Self>) -> Option<Rc<Self>> {
        self.next.borrow().clone()
    }

    fn link(previous: Option<&Rc<Self>>, next: Option<&Rc<Self>>) {
        if let Some(n) = next {
            *n.previous.borrow_mut() = previous.map(Rc::downgrade).unwrap_or_default();
        }
        if let Some(p) = previous {
            *p.next.borrow_mut() = next.cloned();
        }
    }

    /// Forward iteration starting at (and including) this node.
    pub fn iter_next(self: &Rc<Self>) -> impl Iterator<Item = Rc<Self>> {
        let mut current = Some(Rc::clone(self));
        std::iter::from_fn(move || {
            let node = current.take()?;
            current = node.next_node();
            Some(node)
        })
    }

    /// Backward iteration starting at (and including) this node.
    pub fn iter_previous(self: &Rc<Self>) -> impl Iterator<Item = Rc<Self>> {
        let mut current = Some(Rc::clone(self));
        std::iter::from_fn(move || {
            let node = current.take()?;
            current = node.previous_node();
            Some(node)
        })
    }
}

/// Specialized linked list supporting the paragraph-index needs above:
/// nodes may leak and the caller is expected to pair every stored node
/// reference with a well-behaved call to [`LinkedList::remove_node`].
pub struct LinkedList<T> {
    head: Option<Rc<LinkedListNode<T>>>,
    tail: Option<Rc<LinkedListNode<T>>>,
    size: usize,
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        LinkedList {
            head: None,
            tail: None,
            size: 0,
        }
    }
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn tail_node(&self) -> Option<Rc<LinkedListNode<T>>> {
        self.tail.clone()
    }

    pub fn head_node(&self) -> Option<Rc<LinkedListNode<T>>> {
        self.head.clone()
    }

    pub fn iter_nodes(&self) -> impl Iterator<Item = Rc<LinkedListNode<T>>> {
        self.head.clone().into_iter().flat_map(|h| h.iter_next())
    }

    pub fn append(&mut self, value: T) -> Rc<LinkedListNode<T>> {
        let node = LinkedListNode::new(value);
        match &self.tail {
            None => {
                self.head = Some(Rc::clone(&node));
                self.tail = Some(Rc::clone(&node));
            }
            Some(tail) => {
                LinkedListNode::link(Some(tail), Some(&node));
                self.tail = Some(Rc::clone(&node));
            }
        }
        self.size += 1;
        node
    }

    pub fn extend(&mut self, values: impl IntoIterator<Item = T>) {
        for v in values {
            self.append(v);
        }
    }

    /// Removes `node` from the list, restoring head/tail as needed. The
    /// node must belong to this list; violating that is a logic error
    /// (mirrors the Python implementation's documented trust contract).
    pub fn remove_node(&mut self, node: &Rc<LinkedListNode<T>>) {
        let is_head = self.head.as_ref().map(Rc::as_ptr) == Some(Rc::as_ptr(node));
        let is_tail = self.tail.as_ref().map(Rc::as_ptr) == Some(Rc::as_ptr(node));
        if is_head {
            self.head = node.next_node();
            if self.head.is_none() {
                self.tail = None;
            }
        } else if is_tail {
            self.tail = node.previous_node();
        }
        debug_assert!(self.size > 0);
        self.size -= 1;

        let previous = node.previous_node();
        let next = node.next_node();
        LinkedListNode::link(previous.as_ref(), next.as_ref());
        *node.previous.borrow_mut() = Weak::new();
        *node.next.borrow_mut() = None;
    }

    /// Removes every node strictly between `lhs` (exclusive) and `rhs`
    /// (exclusive), relinking the list around the gap; `None` means "from
    /// the start" / "to the end" respectively. The caller has already
    /// located `lhs`/`rhs` by walking the list itself (see the
    /// comment-preserving list-remove algorithm in `list.rs`), so this just
    /// performs the splice.
    pub fn remove_range_exclusive(
        &mut self,
        lhs: Option<&Rc<LinkedListNode<T>>>,
        rhs: Option<&Rc<LinkedListNode<T>>>,
    ) {
        match lhs {
            Some(node) => *node.next.borrow_mut() = rhs.cloned(),
            None => self.head = rhs.cloned(),
        }
        match rhs {
            Some(node) => *node.previous.borrow_mut() = lhs.map(Rc::downgrade).unwrap_or_default(),
            None => self.tail = lhs.cloned(),
        }
        self.size = self.iter_nodes().count();
    }

    pub fn clear(&mut self) {
        self.head = None;
        self.tail = None;
        self.size = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_iterate() {
        let mut list = LinkedList::new();
        list.append(1);
        list.append(2);
        list.append(3);
        let values: Vec<i32> = list.iter_nodes().map(|n| *n.value.borrow()).collect();
        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_remove_head() {
        let mut list = LinkedList::new();
        let n1 = list.append(1);
        list.append(2);
        list.append(3);
        list.remove_node(&n1);
        let values: Vec<i32> = list.iter_nodes().map(|n| *n.value.borrow()).collect();
        assert_eq!(values, vec![2, 3]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove_tail() {
        let mut list = LinkedList::new();
        list.append(1);
        list.append(2);
        let n3 = list.append(3);
        list.remove_node(&n3);
        let values: Vec<i32> = list.iter_nodes().map(|n| *n.value.borrow()).collect();
        assert_eq!(values, vec![1, 2]);
        assert_eq!(list.tail_node().map(|n| *n.value.borrow()), Some(2));
    }

    #[test]
    fn test_remove_middle_preserves_weak_backlinks() {
        let mut list = LinkedList::new();
        list.append(1);
        let n2 = list.append(2);
        list.append(3);
        list.remove_node(&n2);
        let values: Vec<i32> = list.iter_nodes().map(|n| *n.value.borrow()).collect();
        assert_eq!(values, vec![1, 3]);

        // backward iteration from the tail should also skip the removed node
        let tail = list.tail_node().unwrap();
        let backwards: Vec<i32> = tail.iter_previous().map(|n| *n.value.borrow()).collect();
        assert_eq!(backwards, vec![3, 1]);
    }

    #[test]
    fn test_remove_range_exclusive_middle() {
        let mut list = LinkedList::new();
        list.append(1);
        let n2 = list.append(2);
        list.append(3);
        list.append(4);
        let n5 = list.append(5);
        list.remove_range_exclusive(Some(&n2), Some(&n5));
        let values: Vec<i32> = list.iter_nodes().map(|n| *n.value.borrow()).collect();
        assert_eq!(values, vec![1, 2, 5]);
    }

    #[test]
    fn test_remove_range_exclusive_from_start() {
        let mut list = LinkedList::new();
        list.append(1);
        list.append(2);
        let n3 = list.append(3);
        list.remove_range_exclusive(None, Some(&n3));
        let values: Vec<i32> = list.iter_nodes().map(|n| *n.value.borrow()).collect();
        assert_eq!(values, vec![3]);
    }

    #[test]
    fn test_clear() {
        let mut list = LinkedList::new();
        list.extend([1, 2, 3]);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }
}
