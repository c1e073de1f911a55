/*
Segbar - by David Petnick
*/
use bevy::prelude::*;
use std::marker::PhantomData;

/// Quantity (Re)Initialized: Capacity or Unit may Have Changed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetEvent {
    pub amount: f32,
    pub max_amount: f32,
    pub unit: f32,
}

/// Quantity Mutated Within Current Capacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeEvent {
    pub new_amount: f32,
    pub old_amount: f32,
    pub gained: bool,
}

/// Both Kinds in One Stream so Emission Order Survives Delivery
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuantityEvent {
    Set(SetEvent),
    Change(ChangeEvent),
}

impl From<SetEvent> for QuantityEvent {
    fn from(ev: SetEvent) -> Self {
        Self::Set(ev)
    }
}

impl From<ChangeEvent> for QuantityEvent {
    fn from(ev: ChangeEvent) -> Self {
        Self::Change(ev)
    }
}

/// Marker for What a Bar Displays; Bars Only Hear Messages of Their Kind
pub trait QuantityKind: Send + Sync + 'static {}

#[derive(Debug, Clone, Copy, Default)]
pub struct Health;
impl QuantityKind for Health {}

#[derive(Debug, Clone, Copy, Default)]
pub struct Mana;
impl QuantityKind for Mana {}

#[derive(Message, Debug, Clone, Copy)]
pub struct QuantityMessage<Q: QuantityKind> {
    pub event: QuantityEvent,
    _kind: PhantomData<Q>,
}

impl<Q: QuantityKind> QuantityMessage<Q> {
    pub fn new(event: impl Into<QuantityEvent>) -> Self {
        Self {
            event: event.into(),
            _kind: PhantomData,
        }
    }
}
