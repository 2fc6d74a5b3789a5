//! Status byte resolution and running status

/// Status byte that introduces a meta event inside a track
pub const META_STATUS: u8 = 0xFF;

/// Outcome of reading the byte at a status position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedStatus {
    /// Status the message is decoded under
    pub status: u8,
    /// First data byte, already consumed, when the status byte was omitted
    pub peeked: Option<u8>,
}

impl ResolvedStatus {
    /// Data bytes already consumed for this message
    pub fn peeked_len(&self) -> usize {
        self.peeked.map_or(0, |_| 1)
    }
}

/// The last status byte seen in a track, reused when a message omits its status.
///
/// Every status except meta updates it. System exclusive statuses are not excluded, so a data
/// byte following a sysex event is read as another sysex event. Common MIDI libraries clear the
/// running status on sysex instead; this decoder keeps it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningStatus(Option<u8>);

impl RunningStatus {
    /// Resolves the byte read at a status position. A byte with its high bit clear is the first
    /// data byte of a message reusing the running status, and `None` is returned if there is no
    /// status to reuse. Any other byte is the status itself and is recorded unless it is meta.
    pub fn resolve(&mut self, candidate: u8) -> Option<ResolvedStatus> {
        if candidate < 0x80 {
            return self.0.map(|status| ResolvedStatus {
                status,
                peeked: Some(candidate),
            });
        }

        if candidate != META_STATUS {
            self.0 = Some(candidate);
        }

        Some(ResolvedStatus {
            status: candidate,
            peeked: None,
        })
    }
}
