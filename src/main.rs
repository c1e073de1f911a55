/*
Segbar - by David Petnick
*/
use bevy::prelude::*;
use rand::RngExt;
use segbar::{
    spawn_quantity_bar,
    Health,
    QuantityEvent,
    QuantityMessage,
    QuantityOwner,
    SegmentBarConfig,
    SegmentBarPlugin,
    SegmentBarSet,
};

// Demo Hotkeys
pub const DAMAGE_KEY: KeyCode = KeyCode::KeyN;
pub const HEAL_KEY: KeyCode = KeyCode::KeyM;
pub const ADD_MAX_KEY: KeyCode = KeyCode::KeyZ;
pub const REMOVE_MAX_KEY: KeyCode = KeyCode::KeyX;
pub const RESET_KEY: KeyCode = KeyCode::KeyR;
pub const PAUSE_KEY: KeyCode = KeyCode::KeyP;

/// Keyboard Driven Stand-In for a Game's Health System
#[derive(Resource)]
struct DemoHealth {
    owner: QuantityOwner,
    damage: f32,
    heal: f32,
    max_step: f32,
    /// +/- Random Spread Applied to Damage and Heal
    jitter: f32,
}

impl Default for DemoHealth {
    fn default() -> Self {
        Self {
            owner: QuantityOwner::new(100.0, 25.0),
            damage: 15.0,
            heal: 10.0,
            max_step: 25.0,
            jitter: 5.0,
        }
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(SegmentBarPlugin::<Health>::default())
        .init_resource::<DemoHealth>()
        .add_systems(Startup, setup_demo)
        .add_systems(Update, (demo_input, toggle_pause).before(SegmentBarSet))
        .run();
}

fn setup_demo(
    mut commands: Commands,
    demo: Res<DemoHealth>,
    mut writer: MessageWriter<QuantityMessage<Health>>,
) {
    commands.spawn(Camera2d);

    let config = SegmentBarConfig::load();
    info!("bar config: {:?} mode, follow {}", config.mode, config.follow.enabled);

    spawn_quantity_bar::<Health>(
        &mut commands,
        config,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(24.0),
            top: Val::Px(24.0),
            ..default()
        },
    );

    commands.spawn((
        Text::new("N damage  M heal  Z +max  X -max  R reset  P pause"),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(24.0),
            bottom: Val::Px(24.0),
            ..default()
        },
    ));

    writer.write(QuantityMessage::new(demo.owner.initialize()));
}

fn demo_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut demo: ResMut<DemoHealth>,
    mut writer: MessageWriter<QuantityMessage<Health>>,
) {
    let mut emitted: Vec<QuantityEvent> = Vec::new();
    let jitter = demo.jitter;
    let spread = || {
        if jitter > 0.0 {
            rand::rng().random_range(-jitter..=jitter)
        } else {
            0.0
        }
    };

    if keys.just_pressed(DAMAGE_KEY) {
        let dmg = (demo.damage + spread()).max(0.0);
        if let Some(ev) = demo.owner.take_damage(dmg) {
            info!("damage {:.1} -> {:.1}", dmg, demo.owner.amount());
            emitted.push(ev);
        }
        if !demo.owner.is_alive() {
            info!("owner died (R to reset)");
        }
    }

    if keys.just_pressed(HEAL_KEY) && demo.owner.can_heal() {
        let amount = (demo.heal + spread()).max(0.0);
        if let Some(ev) = demo.owner.heal(amount) {
            info!("heal {:.1} -> {:.1}", amount, demo.owner.amount());
            emitted.push(ev);
        }
    }

    if keys.just_pressed(ADD_MAX_KEY) {
        let step = demo.max_step;
        if let Some(ev) = demo.owner.add_max(step) {
            info!("max raised to {}", demo.owner.max_amount());
            emitted.push(ev);
        }
    }

    if keys.just_pressed(REMOVE_MAX_KEY) {
        let step = demo.max_step;
        if let Some(ev) = demo.owner.remove_max(step) {
            info!("max lowered to {}", demo.owner.max_amount());
            emitted.push(ev);
        }
    }

    if keys.just_pressed(RESET_KEY) {
        emitted.push(demo.owner.reset());
        info!("reset to {}", demo.owner.amount());
    }

    writer.write_batch(emitted.into_iter().map(QuantityMessage::<Health>::new));
}

/// Freezes Scaled Time; Bars Configured 'Unscaled' Keep Animating
fn toggle_pause(keys: Res<ButtonInput<KeyCode>>, mut time: ResMut<Time<Virtual>>) {
    if !keys.just_pressed(PAUSE_KEY) {
        return;
    }

    if time.is_paused() {
        time.unpause();
    } else {
        time.pause();
    }
    info!("virtual time paused: {}", time.is_paused());
}
