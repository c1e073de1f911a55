/*
Segbar - by David Petnick
*/
use crate::events::{ChangeEvent, QuantityEvent, SetEvent};

/// Authoritative Holder of a Bounded Quantity (Health, Shield, ...)
/// Every Mutation Returns the Event a Bar Needs to Hear
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityOwner {
    amount: f32,
    max_amount: f32,
    unit: f32,
    alive: bool,
}

impl QuantityOwner {
    /// Starts Full and Alive
    pub fn new(max_amount: f32, unit: f32) -> Self {
        Self {
            amount: max_amount,
            max_amount,
            unit,
            alive: true,
        }
    }

    pub fn amount(&self) -> f32 {
        self.amount
    }

    pub fn max_amount(&self) -> f32 {
        self.max_amount
    }

    pub fn unit(&self) -> f32 {
        self.unit
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn can_heal(&self) -> bool {
        self.alive && self.amount < self.max_amount
    }

    /// Snapshot for (Re)Attaching a Bar
    pub fn initialize(&self) -> QuantityEvent {
        self.set_event().into()
    }

    /// Refill and Revive
    pub fn reset(&mut self) -> QuantityEvent {
        self.amount = self.max_amount;
        self.alive = true;
        self.set_event().into()
    }

    pub fn take_damage(&mut self, damage: f32) -> Option<QuantityEvent> {
        if !self.alive {
            return None;
        }

        let old_amount = self.amount;
        self.amount = (self.amount - damage).clamp(0.0, self.max_amount);
        self.alive = self.amount > 0.0;

        Some(
            ChangeEvent {
                new_amount: self.amount,
                old_amount,
                gained: false,
            }
            .into(),
        )
    }

    pub fn heal(&mut self, amount: f32) -> Option<QuantityEvent> {
        if !self.alive {
            return None;
        }

        let old_amount = self.amount;
        self.amount = (self.amount + amount).clamp(0.0, self.max_amount);

        Some(
            ChangeEvent {
                new_amount: self.amount,
                old_amount,
                gained: true,
            }
            .into(),
        )
    }

    /// Raise Capacity; Current Amount Rises by Same Step
    pub fn add_max(&mut self, amount: f32) -> Option<QuantityEvent> {
        if !self.alive {
            return None;
        }

        self.max_amount += amount;
        self.amount = (self.amount + amount).clamp(0.0, self.max_amount);
        Some(self.set_event().into())
    }

    /// Lower Capacity; Refused if it Would Leave Nothing
    pub fn remove_max(&mut self, amount: f32) -> Option<QuantityEvent> {
        if !self.alive || self.max_amount - amount <= 0.0 {
            return None;
        }

        self.max_amount -= amount;
        self.amount = self.amount.clamp(0.0, self.max_amount);
        Some(self.set_event().into())
    }

    fn set_event(&self) -> SetEvent {
        SetEvent {
            amount: self.amount,
            max_amount: self.max_amount,
            unit: self.unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_clamps_and_kills() {
        let mut o = QuantityOwner::new(100.0, 25.0);
        let ev = o.take_damage(130.0).unwrap();
        assert_eq!(
            ev,
            QuantityEvent::Change(ChangeEvent {
                new_amount: 0.0,
                old_amount: 100.0,
                gained: false,
            })
        );
        assert!(!o.is_alive());
        assert!(o.take_damage(5.0).is_none());
        assert!(o.heal(5.0).is_none());
        assert!(o.add_max(5.0).is_none());
    }

    #[test]
    fn test_heal_is_a_gain_capped_at_max() {
        let mut o = QuantityOwner::new(100.0, 25.0);
        o.take_damage(30.0);
        assert!(o.can_heal());

        let ev = o.heal(50.0).unwrap();
        assert_eq!(
            ev,
            QuantityEvent::Change(ChangeEvent {
                new_amount: 100.0,
                old_amount: 70.0,
                gained: true,
            })
        );
        assert!(!o.can_heal());
    }

    #[test]
    fn test_max_changes_emit_set() {
        let mut o = QuantityOwner::new(100.0, 25.0);
        o.take_damage(10.0);

        let ev = o.add_max(25.0).unwrap();
        assert_eq!(
            ev,
            QuantityEvent::Set(SetEvent {
                amount: 115.0,
                max_amount: 125.0,
                unit: 25.0,
            })
        );

        let ev = o.remove_max(75.0).unwrap();
        assert_eq!(
            ev,
            QuantityEvent::Set(SetEvent {
                amount: 50.0,
                max_amount: 50.0,
                unit: 25.0,
            })
        );

        // Would Reach Zero Capacity
        assert!(o.remove_max(50.0).is_none());
        assert_eq!(o.max_amount(), 50.0);
    }

    #[test]
    fn test_reset_revives() {
        let mut o = QuantityOwner::new(60.0, 20.0);
        o.take_damage(60.0);
        assert!(!o.is_alive());

        let ev = o.reset();
        assert!(o.is_alive());
        assert_eq!(ev, o.initialize());
        assert_eq!(o.amount(), 60.0);
    }
}
