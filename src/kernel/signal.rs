//! Widget → registry signals.
//!
//! Surfaces emit onto a shared bus through a [`SignalEmitter`] tagged with
//! their instance id. The registry connects one handler per signal kind and
//! keeps the returned [`HandlerId`] tokens; a signal is only delivered while
//! its handler is connected, so nothing reaches a widget after `remove`.

use slotmap::{new_key_type, SlotMap};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use super::widget::InstanceId;

new_key_type! {
    pub struct HandlerId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    RaiseRequest,
    EndMove,
    MoveRequest,
    RemoveRequest,
    ReloadRequest,
}

impl SignalKind {
    pub const ALL: [SignalKind; 5] = [
        SignalKind::RaiseRequest,
        SignalKind::EndMove,
        SignalKind::MoveRequest,
        SignalKind::RemoveRequest,
        SignalKind::ReloadRequest,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetSignal {
    RaiseRequest,
    EndMove,
    MoveRequest { dx: i32, dy: i32 },
    RemoveRequest,
    ReloadRequest,
}

impl WidgetSignal {
    pub fn kind(&self) -> SignalKind {
        match self {
            WidgetSignal::RaiseRequest => SignalKind::RaiseRequest,
            WidgetSignal::EndMove => SignalKind::EndMove,
            WidgetSignal::MoveRequest { .. } => SignalKind::MoveRequest,
            WidgetSignal::RemoveRequest => SignalKind::RemoveRequest,
            WidgetSignal::ReloadRequest => SignalKind::ReloadRequest,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SignalMessage {
    pub instance: InstanceId,
    pub signal: WidgetSignal,
}

#[derive(Clone)]
pub struct SignalEmitter {
    instance: InstanceId,
    tx: Sender<SignalMessage>,
}

pub struct SignalReceiver {
    rx: Receiver<SignalMessage>,
}

#[derive(Clone)]
pub struct SignalBus {
    tx: Sender<SignalMessage>,
}

pub fn signal_bus() -> (SignalBus, SignalReceiver) {
    let (tx, rx) = mpsc::channel();
    (SignalBus { tx }, SignalReceiver { rx })
}

impl SignalBus {
    pub fn emitter(&self, instance: InstanceId) -> SignalEmitter {
        SignalEmitter {
            instance,
            tx: self.tx.clone(),
        }
    }
}

impl SignalEmitter {
    pub fn instance(&self) -> &InstanceId {
        &self.instance
    }

    /// Returns `false` once the registry is gone.
    pub fn emit(&self, signal: WidgetSignal) -> bool {
        self.tx
            .send(SignalMessage {
                instance: self.instance.clone(),
                signal,
            })
            .is_ok()
    }

    pub fn move_request(&self, dx: i32, dy: i32) -> bool {
        self.emit(WidgetSignal::MoveRequest { dx, dy })
    }

    pub fn raise_request(&self) -> bool {
        self.emit(WidgetSignal::RaiseRequest)
    }

    pub fn end_move(&self) -> bool {
        self.emit(WidgetSignal::EndMove)
    }

    pub fn remove_request(&self) -> bool {
        self.emit(WidgetSignal::RemoveRequest)
    }

    pub fn reload_request(&self) -> bool {
        self.emit(WidgetSignal::ReloadRequest)
    }
}

impl SignalReceiver {
    pub fn try_recv(&mut self) -> Result<SignalMessage, TryRecvError> {
        self.rx.try_recv()
    }
}

#[derive(Debug, Clone)]
struct Connection {
    instance: InstanceId,
    kind: SignalKind,
}

#[derive(Debug, Default)]
pub struct SignalHub {
    connections: SlotMap<HandlerId, Connection>,
}

impl SignalHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, instance: InstanceId, kind: SignalKind) -> HandlerId {
        self.connections.insert(Connection { instance, kind })
    }

    pub fn disconnect(&mut self, handler: HandlerId) -> bool {
        self.connections.remove(handler).is_some()
    }

    pub fn is_connected(&self, instance: &str, kind: SignalKind) -> bool {
        self.connections
            .values()
            .any(|c| c.kind == kind && c.instance.as_str() == instance)
    }

    pub fn handler_count(&self, instance: &str) -> usize {
        self.connections
            .values()
            .filter(|c| c.instance.as_str() == instance)
            .count()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/signal.rs"]
mod tests;
