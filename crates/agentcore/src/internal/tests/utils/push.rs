use crate::internal::push::state::{ChunkIndex, ChunkSendFn};
use crate::{NodeId, ObjectId};
use std::cell::RefCell;
use std::rc::Rc;

/// Log of dispatched chunks shared by several send callbacks, in dispatch order.
#[derive(Clone, Default)]
pub struct ChunkLog {
    sent: Rc<RefCell<Vec<(NodeId, ObjectId, ChunkIndex)>>>,
}

impl ChunkLog {
    pub fn send_fn(&self, dest_id: NodeId, obj_id: ObjectId) -> ChunkSendFn {
        let sent = self.sent.clone();
        Box::new(move |chunk| sent.borrow_mut().push((dest_id, obj_id, chunk)))
    }

    pub fn take(&self) -> Vec<(NodeId, ObjectId, ChunkIndex)> {
        std::mem::take(&mut *self.sent.borrow_mut())
    }

    pub fn take_chunks(&self) -> Vec<ChunkIndex> {
        self.take().into_iter().map(|(_, _, chunk)| chunk).collect()
    }

    pub fn len(&self) -> usize {
        self.sent.borrow().len()
    }
}

/// Send callback that must never be called.
pub fn forbidden_send_fn() -> ChunkSendFn {
    Box::new(|chunk| panic!("Unexpected send of chunk {chunk}"))
}
