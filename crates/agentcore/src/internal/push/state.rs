/// Zero-based index of a chunk within one pushed object.
pub type ChunkIndex = u64;
pub type ChunkCount = u64;

/// Sends one chunk of an object. The caller of the push manager promises to report
/// completion of every dispatched chunk via `on_chunk_complete`, but never from inside
/// this callback.
pub type ChunkSendFn = Box<dyn FnMut(ChunkIndex)>;

/// Progress of one object push to one destination.
pub(crate) struct PushState {
    num_chunks: ChunkCount,
    send_fn: ChunkSendFn,
    // Cycles through 0..num_chunks; a resend continues from where the previous round ended
    next_chunk_id: ChunkIndex,
    num_chunks_inflight: ChunkCount,
    num_chunks_to_send: ChunkCount,
}

impl PushState {
    pub fn new(num_chunks: ChunkCount, send_fn: ChunkSendFn) -> Self {
        PushState {
            num_chunks,
            send_fn,
            next_chunk_id: 0,
            num_chunks_inflight: 0,
            num_chunks_to_send: num_chunks,
        }
    }

    /// Swaps the callback and schedules all chunks again.
    /// Returns how many chunks were added to the number of chunks to send.
    pub fn resend_all_chunks(&mut self, send_fn: ChunkSendFn) -> ChunkCount {
        self.send_fn = send_fn;
        let additional_chunks = self.num_chunks - self.num_chunks_to_send;
        self.num_chunks_to_send = self.num_chunks;
        additional_chunks
    }

    #[inline]
    pub fn has_chunks_to_send(&self) -> bool {
        self.num_chunks_to_send > 0
    }

    /// Returns false if there was nothing to send.
    pub fn send_one_chunk(&mut self) -> bool {
        if !self.has_chunks_to_send() {
            return false;
        }
        self.num_chunks_to_send -= 1;
        self.num_chunks_inflight += 1;
        (self.send_fn)(self.next_chunk_id);
        self.next_chunk_id = (self.next_chunk_id + 1) % self.num_chunks;
        true
    }

    /// Returns false if no chunk was in flight.
    pub fn on_chunk_complete(&mut self) -> bool {
        if self.num_chunks_inflight == 0 {
            return false;
        }
        self.num_chunks_inflight -= 1;
        true
    }

    #[inline]
    pub fn all_chunks_complete(&self) -> bool {
        self.num_chunks_inflight == 0 && self.num_chunks_to_send == 0
    }

    #[inline]
    pub fn num_chunks(&self) -> ChunkCount {
        self.num_chunks
    }

    #[inline]
    pub fn num_chunks_inflight(&self) -> ChunkCount {
        self.num_chunks_inflight
    }

    #[inline]
    pub fn num_chunks_to_send(&self) -> ChunkCount {
        self.num_chunks_to_send
    }

    #[cfg(test)]
    pub fn next_chunk_id(&self) -> ChunkIndex {
        self.next_chunk_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_fn() -> (ChunkSendFn, Rc<RefCell<Vec<ChunkIndex>>>) {
        let sent = Rc::new(RefCell::new(Vec::new()));
        let sent2 = sent.clone();
        (Box::new(move |chunk| sent2.borrow_mut().push(chunk)), sent)
    }

    #[test]
    fn send_all_chunks_then_complete() {
        let (send_fn, sent) = recording_fn();
        let mut state = PushState::new(2, send_fn);
        assert!(state.send_one_chunk());
        assert!(state.send_one_chunk());
        assert!(!state.send_one_chunk());
        assert_eq!(*sent.borrow(), vec![0, 1]);
        assert_eq!(state.num_chunks_inflight(), 2);
        assert!(!state.all_chunks_complete());

        assert!(state.on_chunk_complete());
        assert!(state.on_chunk_complete());
        assert!(!state.on_chunk_complete());
        assert!(state.all_chunks_complete());
    }

    #[test]
    fn resend_continues_cursor_with_new_callback() {
        let (send_fn, sent) = recording_fn();
        let mut state = PushState::new(3, send_fn);
        assert!(state.send_one_chunk());
        assert!(state.send_one_chunk());
        assert_eq!(state.next_chunk_id(), 2);

        let (send_fn2, sent2) = recording_fn();
        assert_eq!(state.resend_all_chunks(send_fn2), 2);
        assert_eq!(state.num_chunks_to_send(), 3);
        for _ in 0..3 {
            assert!(state.send_one_chunk());
        }
        assert_eq!(*sent.borrow(), vec![0, 1]);
        assert_eq!(*sent2.borrow(), vec![2, 0, 1]);
        assert_eq!(state.num_chunks_inflight(), 5);
        assert_eq!(state.num_chunks(), 3);
    }
}
