/// Generation stamp captured by a request when it is issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Hands out increasing tokens; only the newest one may touch the page.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    generation: u64,
}

impl RequestSequencer {
    pub fn issue(&mut self) -> RequestToken {
        self.generation += 1;
        RequestToken(self.generation)
    }

    /// Make every outstanding token stale without starting a new request.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.generation
    }
}
