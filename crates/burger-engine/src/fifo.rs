use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};
use std::time::Duration;

use burger_core::Order;

/// Hard ceiling on the queue's capacity, matching the plant's wire limit.
pub const MAX_ORDERS: usize = 100;

struct FifoState {
    orders: VecDeque<Order>,
    capacity: usize,
    running: bool,
}

/// Bounded FIFO of pending orders shared between the generator, the
/// dispatcher, and (via `shutdown`) every other thread in the plant.
///
/// Mirrors the classic bounded-buffer pattern: one mutex guarding the
/// queue, one condvar signaled when an order is pushed (`not_empty`), one
/// signaled when space frees up (`not_full`). `shutdown` wakes both so
/// blocked producers and consumers can notice `running` went false and
/// exit instead of waiting forever.
pub(crate) struct Fifo {
    state: Mutex<FifoState>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl Fifo {
    pub(crate) fn new(capacity: usize) -> Fifo {
        let capacity = capacity.min(MAX_ORDERS).max(1);
        Fifo {
            state: Mutex::new(FifoState {
                orders: VecDeque::with_capacity(capacity),
                capacity,
                running: true,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.state.lock().unwrap().capacity
    }

    pub(crate) fn len(&self) -> usize {
        self.state.lock().unwrap().orders.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Blocks until there is room, then pushes `order`. Returns `false`
    /// without pushing if the queue was shut down while waiting.
    pub(crate) fn enqueue(&self, order: Order) -> bool {
        let mut state = self.state.lock().unwrap();
        while state.running && state.orders.len() >= state.capacity {
            state = self.not_full.wait(state).unwrap();
        }
        if !state.running {
            return false;
        }
        state.orders.push_back(order);
        debug_assert!(state.orders.len() <= state.capacity);
        self.not_empty.notify_one();
        true
    }

    /// Blocks until an order is available or the queue is shut down.
    /// Returns `None` once shut down and drained.
    pub(crate) fn dequeue(&self) -> Option<Order> {
        let mut state = self.state.lock().unwrap();
        while state.running && state.orders.is_empty() {
            state = self.not_empty.wait(state).unwrap();
        }
        let order = state.orders.pop_front();
        if order.is_some() {
            self.not_full.notify_one();
        }
        order
    }

    /// Like [`dequeue`](Fifo::dequeue) but gives up after `timeout` and
    /// returns `None` rather than blocking indefinitely. Used by the
    /// dispatcher's backoff loop.
    pub(crate) fn dequeue_timeout(&self, timeout: Duration) -> Option<Order> {
        let mut state = self.state.lock().unwrap();
        loop {
            if !state.running {
                return None;
            }
            if let Some(order) = state.orders.pop_front() {
                self.not_full.notify_one();
                return Some(order);
            }
            let (guard, result) = self.not_empty.wait_timeout(state, timeout).unwrap();
            state = guard;
            if result.timed_out() && state.orders.is_empty() {
                return None;
            }
        }
    }

    /// Wakes every waiter and marks the queue stopped; subsequent
    /// `enqueue`/`dequeue` calls return immediately.
    pub(crate) fn shutdown(&self) {
        let mut state = self.state.lock().unwrap();
        state.running = false;
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burger_core::DEFAULT_MENU;

    #[test]
    fn enqueue_then_dequeue_preserves_order() {
        let fifo = Fifo::new(4);
        let a = Order::new(&DEFAULT_MENU[0]);
        let b = Order::new(&DEFAULT_MENU[1]);
        let a_id = a.id;
        let b_id = b.id;
        assert!(fifo.enqueue(a));
        assert!(fifo.enqueue(b));
        assert_eq!(fifo.dequeue().unwrap().id, a_id);
        assert_eq!(fifo.dequeue().unwrap().id, b_id);
    }

    #[test]
    fn dequeue_timeout_returns_none_when_empty() {
        let fifo = Fifo::new(4);
        assert!(fifo.dequeue_timeout(Duration::from_millis(20)).is_none());
    }

    #[test]
    fn shutdown_releases_blocked_dequeue() {
        let fifo = std::sync::Arc::new(Fifo::new(1));
        let reader = {
            let fifo = fifo.clone();
            std::thread::spawn(move || fifo.dequeue())
        };
        std::thread::sleep(Duration::from_millis(20));
        fifo.shutdown();
        assert_eq!(reader.join().unwrap(), None);
    }

    #[test]
    fn retried_orders_land_behind_orders_already_waiting() {
        let fifo = Fifo::new(4);
        let a = Order::new(&DEFAULT_MENU[0]);
        let b = Order::new(&DEFAULT_MENU[1]);
        let a_id = a.id;
        let b_id = b.id;
        fifo.enqueue(a);
        // Simulates the dispatcher finding no eligible lane and re-admitting
        // the order it just took off the front — it goes to the tail.
        let retried = fifo.dequeue().unwrap();
        fifo.enqueue(b);
        fifo.enqueue(retried);
        assert_eq!(fifo.dequeue().unwrap().id, b_id);
        assert_eq!(fifo.dequeue().unwrap().id, a_id);
    }

    #[test]
    fn capacity_is_clamped_to_max_orders() {
        let fifo = Fifo::new(MAX_ORDERS + 50);
        assert_eq!(fifo.capacity(), MAX_ORDERS);
    }
}
