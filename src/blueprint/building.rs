//! Building records as the game's blueprint importer expects them.

use serde::{Deserialize, Serialize};

/// Item id of a conveyor belt.
pub const BELT_ITEM_ID: u32 = 2003;
/// Model index of a conveyor belt.
pub const BELT_MODEL_INDEX: u32 = 37;
/// Item id of a flow monitor.
pub const MONITOR_ITEM_ID: u32 = 2030;
/// Model index of a flow monitor.
pub const MONITOR_MODEL_INDEX: u32 = 208;

/// Link target meaning "no building".
pub const NO_LINK: i32 = -1;

/// A position relative to the blueprint cursor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Offset {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Indicator behaviour of a flow monitor.
///
/// Only `fail_color_id` varies; every monitor on a screen reports
/// "failing" so its light shows that colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorParameters {
    pub target_belt_id: i32,
    pub offset: i32,
    pub period_ticks_count: i32,
    pub pass_operator: i32,
    pub target_cargo_amount: i32,
    pub pass_color_id: i32,
    pub fail_color_id: i32,
    pub cargo_filter: i32,
    pub spawn_item_operator: i32,
    pub system_warning_mode: i32,
    pub system_warning_icon_id: i32,
    pub alarm_mode: i32,
    pub tone: i32,
    pub falloff_radius: [i32; 2],
    pub repeat: bool,
    pub pitch: i32,
    pub volume: i32,
    pub length: i32,
}

impl MonitorParameters {
    pub fn with_colour(fail_color_id: i32) -> Self {
        Self {
            target_belt_id: 23343,
            offset: 0,
            period_ticks_count: 60,
            pass_operator: 0,
            target_cargo_amount: 30,
            pass_color_id: 0,
            fail_color_id,
            cargo_filter: 0,
            spawn_item_operator: 0,
            system_warning_mode: 0,
            system_warning_icon_id: 402,
            alarm_mode: 0,
            tone: 20,
            falloff_radius: [24, 72],
            repeat: true,
            pitch: 35,
            volume: 80,
            length: 4,
        }
    }
}

/// One building in a blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub index: usize,
    pub area_index: i32,
    pub local_offset: [Offset; 2],
    pub yaw: [f32; 2],
    pub tilt: f32,
    pub item_id: u32,
    pub model_index: u32,
    pub output_obj_idx: i32,
    pub output_to_slot: i32,
    pub input_obj_idx: i32,
    pub input_from_slot: i32,
    pub output_from_slot: i32,
    pub input_to_slot: i32,
    pub output_offset: i32,
    pub input_offset: i32,
    pub recipe_id: i32,
    pub filter_id: i32,
    pub parameters: Option<MonitorParameters>,
}

impl Building {
    /// A belt at `offset`, feeding `next` when given.
    pub fn belt(index: usize, offset: Offset, tilt: f32, next: Option<usize>) -> Self {
        let mut belt = Self {
            index,
            area_index: 0,
            local_offset: [offset, offset],
            yaw: [0.0, 0.0],
            tilt,
            item_id: BELT_ITEM_ID,
            model_index: BELT_MODEL_INDEX,
            output_obj_idx: NO_LINK,
            output_to_slot: 0,
            input_obj_idx: NO_LINK,
            input_from_slot: 0,
            output_from_slot: 0,
            input_to_slot: 1,
            output_offset: 0,
            input_offset: 0,
            recipe_id: 0,
            filter_id: 0,
            parameters: None,
        };
        belt.set_next(next);
        belt
    }

    /// A flow monitor at `offset` showing palette colour `colour`.
    pub fn monitor(index: usize, offset: Offset, colour: usize) -> Self {
        Self {
            index,
            area_index: 0,
            local_offset: [offset, offset],
            yaw: [0.0, 0.0],
            tilt: 0.0,
            item_id: MONITOR_ITEM_ID,
            model_index: MONITOR_MODEL_INDEX,
            output_obj_idx: NO_LINK,
            output_to_slot: 0,
            input_obj_idx: NO_LINK,
            input_from_slot: 0,
            output_from_slot: 0,
            input_to_slot: 0,
            output_offset: 0,
            input_offset: 0,
            recipe_id: 0,
            filter_id: 0,
            parameters: Some(MonitorParameters::with_colour(colour as i32)),
        }
    }

    pub fn is_belt(&self) -> bool {
        self.item_id == BELT_ITEM_ID
    }

    pub fn is_monitor(&self) -> bool {
        self.item_id == MONITOR_ITEM_ID
    }

    pub fn offset(&self) -> Offset {
        self.local_offset[0]
    }

    /// The building this one outputs into.
    pub fn next(&self) -> Option<usize> {
        usize::try_from(self.output_obj_idx).ok()
    }

    /// Point the output at `next`, or terminate the chain. The output slot
    /// follows the link: 1 when linked, 0 when terminal.
    pub fn set_next(&mut self, next: Option<usize>) {
        match next {
            Some(next) => {
                self.output_obj_idx = next as i32;
                self.output_to_slot = 1;
            }
            None => {
                self.output_obj_idx = NO_LINK;
                self.output_to_slot = 0;
            }
        }
    }

    /// Palette index shown by a monitor.
    pub fn colour_index(&self) -> Option<i32> {
        self.parameters.as_ref().map(|p| p.fail_color_id)
    }
}
