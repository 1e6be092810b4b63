use crate::internal::common::{Map, WrappedRcRefCell};
use crate::internal::configuration::AgentConfiguration;
use crate::internal::push::state::{ChunkCount, ChunkSendFn, PushState};
use crate::{NodeId, ObjectId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Destination node and pushed object.
pub type PushId = (NodeId, ObjectId);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushManagerStats {
    pub chunks_in_flight: ChunkCount,
    pub chunks_remaining: ChunkCount,
    pub pushes_in_flight: usize,
    pub pushes_with_work: usize,
    pub max_chunks_in_flight: ChunkCount,
}

/// Rate limiting and deduplication of outbound object pushes.
///
/// At most `max_chunks_in_flight` chunks are being sent at any time. Pushes waiting for
/// budget take turns one chunk at a time, preferring the push with the fewest chunks in
/// flight, so concurrent destinations progress together.
///
/// `push_info` owns every push state. `pending_pushes` contains the ids of exactly those
/// states that still have chunks to send; a state is dropped from `push_info` only when
/// it has nothing to send and nothing in flight.
pub struct PushManager {
    max_chunks_in_flight: ChunkCount,
    chunks_in_flight: ChunkCount,
    chunks_remaining: ChunkCount,
    push_info: Map<PushId, PushState>,
    pending_pushes: VecDeque<PushId>,
}

pub type PushManagerRef = WrappedRcRefCell<PushManager>;

impl PushManagerRef {
    pub fn new(max_chunks_in_flight: ChunkCount) -> Self {
        WrappedRcRefCell::wrap(PushManager::new(max_chunks_in_flight))
    }
}

impl PushManager {
    pub fn new(max_chunks_in_flight: ChunkCount) -> Self {
        assert!(
            max_chunks_in_flight > 0,
            "Push manager needs a positive chunk budget"
        );
        PushManager {
            max_chunks_in_flight,
            chunks_in_flight: 0,
            chunks_remaining: 0,
            push_info: Map::default(),
            pending_pushes: VecDeque::new(),
        }
    }

    pub fn from_configuration(configuration: &AgentConfiguration) -> Self {
        Self::new(configuration.max_chunks_in_flight())
    }

    /// Starts pushing `obj_id` to `dest_id`; `send_fn` is called with chunk indices
    /// `0..num_chunks` as budget allows.
    ///
    /// A push of the same object to the same destination that still has chunks to send
    /// absorbs this request. If it already dispatched every chunk (and only waits for
    /// completions), all chunks are sent again through the new `send_fn`.
    pub fn start_push(
        &mut self,
        dest_id: NodeId,
        obj_id: ObjectId,
        num_chunks: ChunkCount,
        send_fn: ChunkSendFn,
    ) {
        assert!(num_chunks > 0, "Push of {obj_id} has no chunks");
        let push_id = (dest_id, obj_id);
        match self.push_info.get_mut(&push_id) {
            None => {
                log::debug!("Starting push of {obj_id} to {dest_id}, chunks: {num_chunks}");
                self.chunks_remaining += num_chunks;
                self.push_info
                    .insert(push_id, PushState::new(num_chunks, send_fn));
                self.pending_pushes.push_back(push_id);
            }
            Some(state) if state.has_chunks_to_send() => {
                log::debug!("Duplicate push of {obj_id} to {dest_id} suppressed");
            }
            Some(state) => {
                log::debug!(
                    "Resending all {} chunks of {obj_id} to {dest_id}",
                    state.num_chunks()
                );
                self.chunks_remaining += state.resend_all_chunks(send_fn);
                self.pending_pushes.push_back(push_id);
            }
        }
        self.schedule_remaining_pushes();
    }

    /// Called once for every dispatched chunk when its transfer is finished.
    pub fn on_chunk_complete(&mut self, dest_id: NodeId, obj_id: ObjectId) {
        let push_id = (dest_id, obj_id);
        let Some(state) = self.push_info.get_mut(&push_id) else {
            log::warn!("Chunk completion for unknown push of {obj_id} to {dest_id} ignored");
            return;
        };
        if !state.on_chunk_complete() {
            log::warn!(
                "Chunk completion for push of {obj_id} to {dest_id} without chunks in flight"
            );
            return;
        }
        self.chunks_in_flight -= 1;
        if state.all_chunks_complete() {
            self.push_info.remove(&push_id);
            log::debug!(
                "Push of {obj_id} to {dest_id} completed, remaining pushes: {}",
                self.push_info.len()
            );
        }
        self.schedule_remaining_pushes();
    }

    fn schedule_remaining_pushes(&mut self) {
        while self.chunks_in_flight < self.max_chunks_in_flight {
            let Some(push_id) = self.pop_next_pending_push() else {
                break;
            };
            let Some(state) = self.push_info.get_mut(&push_id) else {
                log::error!("Queued push {push_id:?} has no state");
                continue;
            };
            if !state.send_one_chunk() {
                continue;
            }
            self.chunks_in_flight += 1;
            self.chunks_remaining -= 1;
            if state.has_chunks_to_send() {
                self.pending_pushes.push_back(push_id);
            }
        }
    }

    /// Takes the queued push with the fewest chunks in flight; the earliest queued one wins
    /// ties. A push that was served goes to the back of the queue.
    fn pop_next_pending_push(&mut self) -> Option<PushId> {
        let index = self
            .pending_pushes
            .iter()
            .enumerate()
            .min_by_key(|(index, push_id)| {
                let in_flight = self
                    .push_info
                    .get(*push_id)
                    .map(|state| state.num_chunks_inflight())
                    .unwrap_or(0);
                (in_flight, *index)
            })
            .map(|(index, _)| index)?;
        self.pending_pushes.remove(index)
    }

    #[inline]
    pub fn num_chunks_in_flight(&self) -> ChunkCount {
        self.chunks_in_flight
    }

    #[inline]
    pub fn num_chunks_remaining(&self) -> ChunkCount {
        self.chunks_remaining
    }

    #[inline]
    pub fn num_pushes_in_flight(&self) -> usize {
        self.push_info.len()
    }

    #[inline]
    pub fn num_pushes_with_chunks_to_send(&self) -> usize {
        self.pending_pushes.len()
    }

    #[inline]
    pub fn max_chunks_in_flight(&self) -> ChunkCount {
        self.max_chunks_in_flight
    }

    pub fn stats(&self) -> PushManagerStats {
        PushManagerStats {
            chunks_in_flight: self.chunks_in_flight,
            chunks_remaining: self.chunks_remaining,
            pushes_in_flight: self.num_pushes_in_flight(),
            pushes_with_work: self.num_pushes_with_chunks_to_send(),
            max_chunks_in_flight: self.max_chunks_in_flight,
        }
    }

    pub fn record_metrics(&self) {
        tracing::info!(
            action = "push_manager_metrics",
            chunks_in_flight = self.chunks_in_flight,
            chunks_remaining = self.chunks_remaining,
            pushes_in_flight = self.num_pushes_in_flight(),
            pushes_with_work = self.num_pushes_with_chunks_to_send(),
            max_chunks_in_flight = self.max_chunks_in_flight,
        );
    }

    #[cfg(test)]
    pub(crate) fn push_state(&self, dest_id: NodeId, obj_id: ObjectId) -> Option<&PushState> {
        self.push_info.get(&(dest_id, obj_id))
    }
}

impl fmt::Display for PushManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PushManager:")?;
        writeln!(f, "- num pushes in flight: {}", self.num_pushes_in_flight())?;
        writeln!(
            f,
            "- num pushes with chunks to send: {}",
            self.num_pushes_with_chunks_to_send()
        )?;
        writeln!(f, "- num chunks in flight: {}", self.chunks_in_flight)?;
        writeln!(f, "- num chunks remaining: {}", self.chunks_remaining)?;
        write!(f, "- max chunks allowed: {}", self.max_chunks_in_flight)
    }
}
