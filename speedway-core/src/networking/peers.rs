use super::packets::UNASSIGNED_ID;

/// Server-side free-list of wire ids 0..=254, seeded in ascending order at
/// startup. Allocation pops the top of the stack, so the most recently
/// released id is the next one reused.
pub struct IdAllocator {
    available: Vec<u8>,
}

impl IdAllocator {
    pub fn new() -> IdAllocator {
        IdAllocator {
            available: (0..UNASSIGNED_ID).collect(),
        }
    }

    pub fn allocate(&mut self) -> Option<u8> {
        self.available.pop()
    }

    pub fn release(&mut self, id: u8) {
        self.available.push(id);
    }

    pub fn remaining(&self) -> usize {
        self.available.len()
    }
}

/// Client-side view of who is in the session.
///
/// An incoming IdAssignment is read against local state: a client with no id
/// yet adopts the assigned id and imports the accompanying list (skipping its
/// own id); a client that already has one treats the same packet as a
/// new-peer announcement and appends the assigned id.
pub struct ClientIdTable {
    local_id: Option<u8>,
    remote_ids: Vec<u8>,
}

impl ClientIdTable {
    pub fn new() -> ClientIdTable {
        ClientIdTable {
            local_id: None,
            remote_ids: Vec::new(),
        }
    }

    pub fn local_id(&self) -> Option<u8> {
        self.local_id
    }

    pub fn remote_ids(&self) -> &[u8] {
        &self.remote_ids
    }

    pub fn handle_id_assignment(&mut self, assigned_id: u8, known_ids: &[u8]) {
        match self.local_id {
            None => {
                self.local_id = Some(assigned_id);
                self.remote_ids = known_ids
                    .iter()
                    .copied()
                    .filter(|id| *id != assigned_id)
                    .collect();
            }
            Some(_) => {
                self.remote_ids.push(assigned_id);
            }
        }
    }
}
