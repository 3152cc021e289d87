use std::{thread, time::Duration};

use futures::{
    Stream, StreamExt,
    channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded},
};
use parking_lot::Mutex;
use sprconv_canvas::RepaintRequest;

/// Receiver side of the most recent [`channel`], picked up by the UI
/// subscription.
static PENDING_EVENTS: Mutex<Option<UnboundedReceiver<()>>> = parking_lot::const_mutex(None);

/// Forwards repaint requests into the UI event loop.
#[derive(Debug, Clone)]
pub struct ChannelRepaint {
    sender: UnboundedSender<()>,
}

impl RepaintRequest for ChannelRepaint {
    fn request_repaint(&self, delay: Duration) {
        if delay.is_zero() {
            send(&self.sender);
            return;
        }

        let sender = self.sender.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            send(&sender);
        });
    }
}

fn send(sender: &UnboundedSender<()>) {
    if sender.unbounded_send(()).is_err() {
        log::debug!("Repaint requested after the viewer shut down.");
    }
}

pub fn channel() -> ChannelRepaint {
    let (sender, receiver) = unbounded();
    *PENDING_EVENTS.lock() = Some(receiver);
    ChannelRepaint { sender }
}

/// Repaint requests of the last created channel. Yields nothing if they
/// were already taken.
pub fn events() -> impl Stream<Item = ()> {
    futures::stream::iter(PENDING_EVENTS.lock().take()).flatten()
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn requests_arrive_in_the_event_stream() {
        let repaint = channel();
        let mut events = Box::pin(events());

        repaint.request_repaint(Duration::ZERO);
        assert_eq!(block_on(events.next()), Some(()));

        repaint.request_repaint(Duration::from_millis(5));
        assert_eq!(block_on(events.next()), Some(()));

        // The receiver is handed out once.
        let mut again = Box::pin(super::events());
        drop(repaint);
        assert_eq!(block_on(again.next()), None);
    }
}
