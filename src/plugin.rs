/*
Segbar - by David Petnick
*/
use bevy::prelude::*;
use std::marker::PhantomData;

use crate::bar::{Segment, SegmentBar};
use crate::config::{to_color, SegmentBarConfig, TimeSource};
use crate::events::{QuantityEvent, QuantityKind, QuantityMessage};
use crate::segments::{SegmentEdit, SegmentShape};

/// Adds Segmented Bars for One Quantity Kind
///
/// ```ignore
/// app.add_plugins(SegmentBarPlugin::<Health>::default());
/// spawn_quantity_bar::<Health>(&mut commands, config, Node::default());
/// // owner side
/// writer.write(QuantityMessage::<Health>::new(owner.initialize()));
/// ```
pub struct SegmentBarPlugin<Q: QuantityKind> {
    _kind: PhantomData<Q>,
}

impl<Q: QuantityKind> Default for SegmentBarPlugin<Q> {
    fn default() -> Self {
        Self { _kind: PhantomData }
    }
}

impl<Q: QuantityKind> Plugin for SegmentBarPlugin<Q> {
    fn build(&self, app: &mut App) {
        app.add_message::<QuantityMessage<Q>>()
            // tick first so an animation started this frame shows its t = 0 frame
            .add_systems(
                Update,
                (
                    layout_new_bars::<Q>,
                    tick_follow_animations::<Q>,
                    apply_quantity_messages::<Q>,
                    sync_segment_nodes::<Q>,
                    detach_removed_bars::<Q>,
                )
                    .chain()
                    .in_set(SegmentBarSet),
            );
    }
}

/// Owners Writing Messages Should Run `.before(SegmentBarSet)` to Land Same Frame
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentBarSet;

#[derive(Component)]
pub struct SegmentRoot;

#[derive(Component)]
pub struct SegmentFill;

#[derive(Component)]
pub struct SegmentFollowFill;

/// UI Entities Backing One Segment; Root Carries the Background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentNodes {
    pub root: Entity,
    pub follow: Entity,
    pub fill: Entity,
}

/// Put This on a UI 'Node' to Turn it Into a Bar
/// Listens to `QuantityMessage<Q>` for as Long as it is Attached
#[derive(Component)]
pub struct QuantityBar<Q: QuantityKind> {
    config: SegmentBarConfig,
    bar: SegmentBar,
    nodes: Vec<SegmentNodes>,
    pending: Vec<SegmentEdit>,
    _kind: PhantomData<Q>,
}

impl<Q: QuantityKind> QuantityBar<Q> {
    pub fn new(config: SegmentBarConfig) -> Self {
        let bar = SegmentBar::new(
            config.mode,
            config.follow.enabled,
            config.follow.duration_secs,
        );
        Self {
            config,
            bar,
            nodes: Vec::new(),
            pending: Vec::new(),
            _kind: PhantomData,
        }
    }

    pub fn config(&self) -> &SegmentBarConfig {
        &self.config
    }

    pub fn bar(&self) -> &SegmentBar {
        &self.bar
    }

    pub fn segment_nodes(&self) -> &[SegmentNodes] {
        &self.nodes
    }

    fn apply(&mut self, event: QuantityEvent) {
        let edits = self.bar.handle(event);
        self.pending.extend(edits);
    }
}

pub fn spawn_quantity_bar<Q: QuantityKind>(
    commands: &mut Commands,
    config: SegmentBarConfig,
    node: Node,
) -> Entity {
    commands
        .spawn((Name::new("quantity_bar"), node, QuantityBar::<Q>::new(config)))
        .id()
}

fn layout_new_bars<Q: QuantityKind>(
    mut q: Query<(&QuantityBar<Q>, &mut Node), Added<QuantityBar<Q>>>,
) {
    for (qb, mut node) in &mut q {
        node.flex_direction = FlexDirection::Row;
        node.align_items = AlignItems::Center;
        node.column_gap = Val::Px(qb.config.spacing);
    }
}

pub fn tick_follow_animations<Q: QuantityKind>(
    scaled: Res<Time<Virtual>>,
    unscaled: Res<Time<Real>>,
    mut q: Query<&mut QuantityBar<Q>>,
) {
    for mut qb in &mut q {
        // Don't Touch Idle Bars (Keeps Change Detection Quiet)
        if !qb.bar.is_animating() {
            continue;
        }

        let dt = match qb.config.follow.time_source {
            TimeSource::Scaled => scaled.delta_secs(),
            TimeSource::Unscaled => unscaled.delta_secs(),
        };
        qb.bar.tick(dt);
    }
}

/// Feed Messages to Every Attached Bar, Strictly in Emission Order
pub fn apply_quantity_messages<Q: QuantityKind>(
    mut messages: MessageReader<QuantityMessage<Q>>,
    mut q: Query<&mut QuantityBar<Q>>,
) {
    for msg in messages.read() {
        if let QuantityEvent::Set(set) = msg.event {
            if !(set.unit.is_finite() && set.unit > 0.0) {
                warn!("ignoring bar set with unit {} (must be > 0)", set.unit);
                continue;
            }
        }

        for mut qb in &mut q {
            qb.apply(msg.event);
        }
    }
}

/// Mirror Structural Edits Into UI Entities, Then Push Fill Widths / Tint
pub fn sync_segment_nodes<Q: QuantityKind>(
    mut commands: Commands,
    asset_server: Option<Res<AssetServer>>,
    mut bars: Query<(Entity, &mut QuantityBar<Q>), Changed<QuantityBar<Q>>>,
    mut nodes: Query<(&mut Node, &mut BackgroundColor), Without<QuantityBar<Q>>>,
) {
    for (bar_root, qb) in &mut bars {
        let qb = qb.into_inner();
        let follow_color = qb.config.follow.tint_color(qb.bar.follow_tint());

        for edit in std::mem::take(&mut qb.pending) {
            match edit {
                SegmentEdit::PopTail => {
                    if let Some(seg) = qb.nodes.pop() {
                        commands.entity(seg.root).despawn();
                    }
                }
                SegmentEdit::Push(shape) => {
                    let index = qb.nodes.len();
                    let spawned = spawn_segment(
                        &mut commands,
                        bar_root,
                        &qb.config,
                        shape,
                        qb.bar.segments().get(index),
                        follow_color,
                        asset_server.as_deref(),
                    );
                    qb.nodes.push(spawned);
                }
            }
        }

        // Entities Spawned Above Aren't Queryable Yet; They Got Their Values at Spawn
        for (seg, n) in qb.bar.segments().iter().zip(&qb.nodes) {
            if let Ok((mut node, _)) = nodes.get_mut(n.fill) {
                node.width = Val::Percent(seg.fill * 100.0);
            }
            if let Ok((mut node, mut bg)) = nodes.get_mut(n.follow) {
                node.width = Val::Percent(seg.follow_fill * 100.0);
                bg.0 = follow_color;
            }
        }
    }
}

fn spawn_segment(
    commands: &mut Commands,
    bar_root: Entity,
    config: &SegmentBarConfig,
    shape: SegmentShape,
    seg: Option<&Segment>,
    follow_color: Color,
    asset_server: Option<&AssetServer>,
) -> SegmentNodes {
    let template = config.templates.for_shape(shape);
    let (fill, follow_fill) = seg.map(|s| (s.fill, s.follow_fill)).unwrap_or((0.0, 0.0));

    let root = commands
        .spawn((
            Name::new("segment"),
            SegmentRoot,
            Node {
                width: Val::Px(template.width),
                height: Val::Px(config.segment_height),
                ..default()
            },
            BackgroundColor(to_color(config.background_color)),
            ChildOf(bar_root),
        ))
        .id();

    if let (Some(path), Some(assets)) = (&template.image, asset_server) {
        let image: Handle<Image> = assets.load(path.clone());
        commands.entity(root).insert(ImageNode::new(image));
    }

    // Follow Under, Primary on Top
    let follow = commands
        .spawn((
            SegmentFollowFill,
            fill_node(follow_fill),
            BackgroundColor(follow_color),
            ChildOf(root),
        ))
        .id();

    let fill = commands
        .spawn((
            SegmentFill,
            fill_node(fill),
            BackgroundColor(to_color(config.fill_color)),
            ChildOf(root),
        ))
        .id();

    SegmentNodes { root, follow, fill }
}

fn fill_node(fraction: f32) -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(0.0),
        top: Val::Px(0.0),
        width: Val::Percent(fraction * 100.0),
        height: Val::Percent(100.0),
        ..default()
    }
}

/// Bar Component Removed Without Despawning the Node: Drop its Segments
fn detach_removed_bars<Q: QuantityKind>(
    mut commands: Commands,
    mut removed: RemovedComponents<QuantityBar<Q>>,
    q_children: Query<&Children>,
    q_segments: Query<(), With<SegmentRoot>>,
) {
    for bar_root in removed.read() {
        let Ok(children) = q_children.get(bar_root) else {
            continue;
        };
        for child in children.iter() {
            if q_segments.contains(child) {
                commands.entity(child).try_despawn();
            }
        }
    }
}
