use ordia_core::TxEntry;

/// Queue errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum QueueError {
    #[error("Priority queue is full")]
    Full,

    #[error("Priority queue is empty")]
    Empty,
}

/// Fixed-capacity binary max-heap of pending transactions, keyed by fee.
///
/// Storage is allocated once at construction; no operation allocates
/// afterwards. Entries with equal fees may be reordered arbitrarily by
/// heap maintenance — FIFO among equal fees is explicitly not guaranteed.
pub struct FeeHeap {
    entries: Vec<TxEntry>,
    cap: usize,
}

impl FeeHeap {
    /// Create a heap with a fixed capacity
    pub fn with_capacity(cap: usize) -> Self {
        FeeHeap {
            entries: Vec::with_capacity(cap),
            cap,
        }
    }

    /// Insert an entry, restoring heap order by sifting up. O(log n).
    pub fn push(&mut self, entry: TxEntry) -> Result<(), QueueError> {
        if self.entries.len() >= self.cap {
            return Err(QueueError::Full);
        }

        self.entries.push(entry);

        let mut idx = self.entries.len() - 1;
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.entries[parent].fee >= self.entries[idx].fee {
                break;
            }
            self.entries.swap(idx, parent);
            idx = parent;
        }

        Ok(())
    }

    /// Remove and return the highest-fee entry, restoring heap order by
    /// sifting the moved-up last element down. O(log n).
    pub fn pop(&mut self) -> Result<TxEntry, QueueError> {
        if self.entries.is_empty() {
            return Err(QueueError::Empty);
        }

        // Move the last element into the root slot and sift it down.
        let top = self.entries.swap_remove(0);

        let mut idx = 0;
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut best = idx;

            if left < self.entries.len() && self.entries[left].fee > self.entries[best].fee {
                best = left;
            }
            if right < self.entries.len() && self.entries[right].fee > self.entries[best].fee {
                best = right;
            }
            if best == idx {
                break;
            }

            self.entries.swap(idx, best);
            idx = best;
        }

        Ok(top)
    }

    /// Read-only access to the highest-fee entry
    pub fn peek(&self) -> Option<&TxEntry> {
        self.entries.first()
    }

    /// Current number of queued entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fixed capacity set at construction
    pub fn capacity(&self) -> usize {
        self.cap
    }
}
