//! Abstract stitch command model.
//!
//! A [`Pattern`] is the planner's output and the encoder's input: an
//! ordered command list in absolute output-space millimeters, terminated
//! by exactly one [`StitchCommand::End`].

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point};

/// One abstract machine instruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StitchCommand {
    /// Reposition the needle without stitching (jump).
    Move { x: f64, y: f64 },
    /// Stitch to the given coordinate.
    Stitch { x: f64, y: f64 },
    /// Terminate the pattern.
    End,
}

impl StitchCommand {
    /// Target coordinate of the command, if it has one.
    pub fn coords(&self) -> Option<(f64, f64)> {
        match *self {
            Self::Move { x, y } | Self::Stitch { x, y } => Some((x, y)),
            Self::End => None,
        }
    }
}

/// The complete ordered command sequence for one conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    commands: Vec<StitchCommand>,
}

impl Pattern {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: StitchCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[StitchCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of needle movements (`Move` + `Stitch`), `End` excluded.
    /// This is the value written to the DST header's stitch count field.
    pub fn stitch_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| !matches!(c, StitchCommand::End))
            .count()
    }

    /// True when the command list is well formed: starts with `Move`,
    /// ends with `End`, and `End` appears exactly once.
    pub fn is_well_formed(&self) -> bool {
        let starts_with_move = matches!(self.commands.first(), Some(StitchCommand::Move { .. }));
        let ends_with_end = matches!(self.commands.last(), Some(StitchCommand::End));
        let end_count = self
            .commands
            .iter()
            .filter(|c| matches!(c, StitchCommand::End))
            .count();
        starts_with_move && ends_with_end && end_count == 1
    }

    /// Bounding box over all command coordinates, or `None` for a
    /// pattern with no movements.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds = Bounds::empty();
        let mut has_points = false;
        for command in &self.commands {
            if let Some((x, y)) = command.coords() {
                bounds.include(Point::new(x, y));
                has_points = true;
            }
        }
        has_points.then_some(bounds)
    }
}

impl FromIterator<StitchCommand> for Pattern {
    fn from_iter<I: IntoIterator<Item = StitchCommand>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stitch_count_excludes_end() {
        let pattern: Pattern = [
            StitchCommand::Move { x: 0.0, y: 0.0 },
            StitchCommand::Stitch { x: 1.0, y: 0.0 },
            StitchCommand::Stitch { x: 1.0, y: 1.0 },
            StitchCommand::End,
        ]
        .into_iter()
        .collect();
        assert_eq!(pattern.stitch_count(), 3);
        assert!(pattern.is_well_formed());
    }

    #[test]
    fn test_well_formedness_checks() {
        let no_end: Pattern = [StitchCommand::Move { x: 0.0, y: 0.0 }].into_iter().collect();
        assert!(!no_end.is_well_formed());

        let starts_with_stitch: Pattern = [
            StitchCommand::Stitch { x: 0.0, y: 0.0 },
            StitchCommand::End,
        ]
        .into_iter()
        .collect();
        assert!(!starts_with_stitch.is_well_formed());

        let double_end: Pattern = [
            StitchCommand::Move { x: 0.0, y: 0.0 },
            StitchCommand::End,
            StitchCommand::End,
        ]
        .into_iter()
        .collect();
        assert!(!double_end.is_well_formed());
    }

    #[test]
    fn test_pattern_bounds() {
        let pattern: Pattern = [
            StitchCommand::Move { x: 1.0, y: 2.0 },
            StitchCommand::Stitch { x: -3.0, y: 5.0 },
            StitchCommand::End,
        ]
        .into_iter()
        .collect();
        let bounds = pattern.bounds().expect("bounds");
        assert_eq!(bounds.min_x, -3.0);
        assert_eq!(bounds.max_x, 1.0);
        assert_eq!(bounds.min_y, 2.0);
        assert_eq!(bounds.max_y, 5.0);

        let empty: Pattern = [StitchCommand::End].into_iter().collect();
        assert!(empty.bounds().is_none());
    }
}
