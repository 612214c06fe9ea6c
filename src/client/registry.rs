//! Connection registry
//!
//! Tracks live connections and their outbound message channels so
//! announcements can be fanned out to everyone.

use std::collections::HashMap;
use std::net::SocketAddr;

use tokio::sync::mpsc::UnboundedSender;

/// A live connection's registry entry.
struct ConnectionHandle {
    display_name: Option<String>,
    sender: UnboundedSender<String>,
}

/// Registry of live connections.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: HashMap<SocketAddr, ConnectionHandle>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, addr: SocketAddr, sender: UnboundedSender<String>) {
        self.connections.insert(
            addr,
            ConnectionHandle {
                display_name: None,
                sender,
            },
        );
    }

    pub fn remove(&mut self, addr: &SocketAddr) {
        self.connections.remove(addr);
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Records the display name a connection identified with.
    pub fn set_display_name(&mut self, addr: &SocketAddr, name: String) {
        if let Some(handle) = self.connections.get_mut(addr) {
            handle.display_name = Some(name);
        }
    }

    /// Sends a line to every live connection. Connections whose channel has
    /// already closed are skipped; teardown removes them shortly after.
    pub fn broadcast(&self, line: &str) {
        for handle in self.connections.values() {
            let _ = handle.sender.send(line.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn addr(port: u16) -> SocketAddr {
        format!("127.0.0.1:{}", port).parse().unwrap()
    }

    #[test]
    fn insert_and_remove_track_len() {
        let mut registry = ConnectionRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();

        registry.insert(addr(1000), tx);
        assert_eq!(registry.len(), 1);

        registry.remove(&addr(1000));
        assert!(registry.is_empty());
    }

    #[test]
    fn broadcast_reaches_every_connection() {
        let mut registry = ConnectionRegistry::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        registry.insert(addr(1000), tx1);
        registry.insert(addr(1001), tx2);

        registry.broadcast("alice has registered an account!");

        assert_eq!(rx1.try_recv().unwrap(), "alice has registered an account!");
        assert_eq!(rx2.try_recv().unwrap(), "alice has registered an account!");
    }

    #[test]
    fn broadcast_skips_closed_channels() {
        let mut registry = ConnectionRegistry::new();
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        registry.insert(addr(1000), tx1);
        registry.insert(addr(1001), tx2);
        drop(rx1);

        registry.broadcast("hello");

        assert_eq!(rx2.try_recv().unwrap(), "hello");
    }
}
