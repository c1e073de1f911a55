/*
Segbar - by David Petnick
*/
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::bar::FollowTint;
use crate::segments::{EdgeType, SegmentMode, SegmentShape};

pub const CONFIG_FILE: &str = "segbar.ron";

/// Linear sRGBA Quad, Kept Plain so RON Files Stay Readable
pub type Rgba = [f32; 4];

#[inline]
pub fn to_color(c: Rgba) -> Color {
	Color::srgba(c[0], c[1], c[2], c[3])
}

/// Which Clock Drives Follow Animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeSource {
	/// 'Time<Virtual>': Pauses and Speeds up With Game
	#[default]
	Scaled,
	/// 'Time<Real>': Keeps Running While Game is Paused
	Unscaled,
}

/// Per Edge Type Look for One Segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentTemplate {
	/// Logical Pixels
	pub width: f32,
	/// Optional Background Image (Asset Path), Drawn Under the Fills
	#[serde(default)]
	pub image: Option<String>,
}

impl SegmentTemplate {
	pub fn plain(width: f32) -> Self {
		Self { width, image: None }
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentTemplates {
	pub uniform: SegmentTemplate,
	pub first: SegmentTemplate,
	pub middle: SegmentTemplate,
	pub last: SegmentTemplate,
	pub single: SegmentTemplate,
}

impl Default for SegmentTemplates {
	fn default() -> Self {
		Self {
			uniform: SegmentTemplate::plain(40.0),
			first: SegmentTemplate::plain(44.0),
			middle: SegmentTemplate::plain(40.0),
			last: SegmentTemplate::plain(44.0),
			single: SegmentTemplate::plain(48.0),
		}
	}
}

impl SegmentTemplates {
	pub fn for_shape(&self, shape: SegmentShape) -> &SegmentTemplate {
		match shape {
			SegmentShape::Uniform                 => &self.uniform,
			SegmentShape::Edged(EdgeType::First)  => &self.first,
			SegmentShape::Edged(EdgeType::Middle) => &self.middle,
			SegmentShape::Edged(EdgeType::Last)   => &self.last,
			SegmentShape::Edged(EdgeType::Single) => &self.single,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowConfig {
	/// When False, Changes are Written Straight to Primary Fill
	pub enabled: bool,
	/// Seconds From Old Value to New
	pub duration_secs: f32,
	pub gain_color: Rgba,
	pub lose_color: Rgba,
	#[serde(default)]
	pub time_source: TimeSource,
}

impl Default for FollowConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			duration_secs: 0.5,
			gain_color: [0.35, 0.95, 0.45, 1.0],
			lose_color: [0.95, 0.85, 0.25, 1.0],
			time_source: TimeSource::Scaled,
		}
	}
}

impl FollowConfig {
	pub fn tint_color(&self, tint: FollowTint) -> Color {
		match tint {
			FollowTint::Gain => to_color(self.gain_color),
			FollowTint::Lose => to_color(self.lose_color),
		}
	}
}

/// Static Look & Feel of a Segmented Bar
/// Read Once When Bar is Built; Core Never Mutates It
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentBarConfig {
	/// Gap Between Segments (Logical Pixels)
	pub spacing: f32,
	pub segment_height: f32,
	pub fill_color: Rgba,
	pub background_color: Rgba,
	pub mode: SegmentMode,
	pub templates: SegmentTemplates,
	pub follow: FollowConfig,
}

impl Default for SegmentBarConfig {
	fn default() -> Self {
		Self {
			spacing: 4.0,
			segment_height: 18.0,
			fill_color: [0.85, 0.1, 0.1, 1.0],
			background_color: [0.08, 0.08, 0.08, 0.9],
			mode: SegmentMode::Edged,
			templates: SegmentTemplates::default(),
			follow: FollowConfig::default(),
		}
	}
}

impl SegmentBarConfig {
	fn config_path() -> Option<PathBuf> {
		#[cfg(debug_assertions)]
		{
			// Debug Builds: Project Directory
			let mut p = std::env::current_dir().ok()?;
			p.push(CONFIG_FILE);
			Some(p)
		}
		#[cfg(not(debug_assertions))]
		{
			// Release Builds: Per User Config Dir
			dirs::config_dir().and_then(|mut p| {
				p.push("Segbar");
				std::fs::create_dir_all(&p).ok()?;
				p.push(CONFIG_FILE);
				Some(p)
			})
		}
	}

	/// Load From Disk, Falling Back to Defaults
	/// Missing File is Normal; Broken File is Logged
	pub fn load() -> Self {
		let Some(path) = Self::config_path() else {
			return Self::default();
		};
		let Ok(contents) = std::fs::read_to_string(&path) else {
			return Self::default();
		};
		Self::from_ron(&contents).unwrap_or_else(|| {
			warn!("bad bar config {}, using defaults", path.display());
			Self::default()
		})
	}

	pub fn from_ron(contents: &str) -> Option<Self> {
		match ron::from_str(contents) {
			Ok(cfg) => Some(cfg),
			Err(err) => {
				warn!("failed to parse bar config: {}", err);
				None
			}
		}
	}

	pub fn to_ron(&self) -> Option<String> {
		ron::ser::to_string_pretty(self, Default::default()).ok()
	}

	pub fn save(&self) {
		let Some(path) = Self::config_path() else {
			return;
		};
		let Some(contents) = self.to_ron() else {
			warn!("failed to serialize bar config");
			return;
		};
		if let Err(err) = std::fs::write(&path, contents) {
			warn!("failed to write {}: {}", path.display(), err);
		}
	}
}
