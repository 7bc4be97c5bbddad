// src/session.rs

//! The event-driven application core.
//!
//! `Session` owns the configuration, the walls, the wall-creation form,
//! and the active paint color. Each user action arrives as one
//! `SessionInput`, is processed to completion, and yields a status the
//! front-end loop acts on. There is no background work: every edit,
//! recompute, and file write happens synchronously inside `process`.
//!
//! The command parser is the input boundary: unknown layout names,
//! malformed integers, and out-of-range coordinates are rejected here
//! with descriptive errors, and the session keeps running.

use std::path::PathBuf;

use anyhow::{bail, ensure, Context};
use log::{debug, info};

use crate::color::{Rgb, DEFAULT_PAINT};
use crate::config::Config;
use crate::form::{Field, FieldStatus, WallForm};
use crate::layout::{Layout, ALL_LAYOUTS};
use crate::serializer;
use crate::wall::Wall;

/// Status of the session after processing one input.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SessionStatus {
    /// Input handled; keep accepting events.
    Running,
    /// The user asked to quit.
    Shutdown,
}

/// One user action, mirroring the interactive surface of the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    /// Edit one wall-creation form field.
    SetField { field: Field, value: String },
    /// Pick the default layout for newly created walls.
    SelectLayout(Layout),
    /// Create a wall from the current form values.
    CreateWall,
    /// List existing walls.
    ListWalls,
    /// Describe one wall's crates.
    ShowWall { wall: usize },
    /// Pick the active paint color.
    SelectColor(Rgb),
    /// Paint one pixel of one crate with the active color.
    Paint {
        wall: usize,
        crate_index: usize,
        row: usize,
        col: usize,
    },
    /// Paint a crate's trailing extra pixel with the active color.
    PaintExtra { wall: usize, crate_index: usize },
    /// Assign a crate's chain position (`-1` excludes it).
    SetChain {
        wall: usize,
        crate_index: usize,
        position: i64,
    },
    /// Switch a crate's wiring layout.
    SetLayout {
        wall: usize,
        crate_index: usize,
        layout: Layout,
    },
    /// Enable or disable a crate's extra pixel.
    SetExtraPixel {
        wall: usize,
        crate_index: usize,
        enabled: bool,
    },
    /// Export a wall's `.crate` artifact.
    Save { wall: usize },
    /// End the session.
    Quit,
}

/// Parses one command line into a `SessionInput`.
///
/// Returns `Ok(None)` for blank lines and `#` comments. The grammar is
/// one command per line, whitespace separated:
///
/// ```text
/// set <wall-width|wall-height|crate-width|crate-height> <value>
/// layout <Layout1..Layout8>
/// wall | walls | show <wall>
/// color <#rrggbb>
/// paint <wall> <crate> <row> <col>
/// paint-extra <wall> <crate>
/// chain <wall> <crate> <position>
/// relayout <wall> <crate> <Layout1..Layout8>
/// extra <wall> <crate> <on|off>
/// save <wall>
/// quit
/// ```
pub fn parse_command(line: &str) -> anyhow::Result<Option<SessionInput>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    let input = match command {
        "set" => {
            ensure!(args.len() == 2, "usage: set <field> <value>");
            let field = parse_field(args[0])?;
            SessionInput::SetField {
                field,
                value: args[1].to_string(),
            }
        }
        "layout" => {
            ensure!(args.len() == 1, "usage: layout <Layout1..Layout8>");
            SessionInput::SelectLayout(parse_layout(args[0])?)
        }
        "wall" => {
            ensure!(args.is_empty(), "usage: wall");
            SessionInput::CreateWall
        }
        "walls" => {
            ensure!(args.is_empty(), "usage: walls");
            SessionInput::ListWalls
        }
        "show" => {
            ensure!(args.len() == 1, "usage: show <wall>");
            SessionInput::ShowWall {
                wall: parse_index(args[0], "wall")?,
            }
        }
        "color" => {
            ensure!(args.len() == 1, "usage: color <#rrggbb>");
            SessionInput::SelectColor(Rgb::from_hex(args[0])?)
        }
        "paint" => {
            ensure!(args.len() == 4, "usage: paint <wall> <crate> <row> <col>");
            SessionInput::Paint {
                wall: parse_index(args[0], "wall")?,
                crate_index: parse_index(args[1], "crate")?,
                row: parse_index(args[2], "row")?,
                col: parse_index(args[3], "col")?,
            }
        }
        "paint-extra" => {
            ensure!(args.len() == 2, "usage: paint-extra <wall> <crate>");
            SessionInput::PaintExtra {
                wall: parse_index(args[0], "wall")?,
                crate_index: parse_index(args[1], "crate")?,
            }
        }
        "chain" => {
            ensure!(args.len() == 3, "usage: chain <wall> <crate> <position>");
            let position: i64 = args[2]
                .parse()
                .with_context(|| format!("chain position {:?} is not an integer", args[2]))?;
            SessionInput::SetChain {
                wall: parse_index(args[0], "wall")?,
                crate_index: parse_index(args[1], "crate")?,
                position,
            }
        }
        "relayout" => {
            ensure!(
                args.len() == 3,
                "usage: relayout <wall> <crate> <Layout1..Layout8>"
            );
            SessionInput::SetLayout {
                wall: parse_index(args[0], "wall")?,
                crate_index: parse_index(args[1], "crate")?,
                layout: parse_layout(args[2])?,
            }
        }
        "extra" => {
            ensure!(args.len() == 3, "usage: extra <wall> <crate> <on|off>");
            let enabled = match args[2] {
                "on" => true,
                "off" => false,
                other => bail!("expected on or off, got {:?}", other),
            };
            SessionInput::SetExtraPixel {
                wall: parse_index(args[0], "wall")?,
                crate_index: parse_index(args[1], "crate")?,
                enabled,
            }
        }
        "save" => {
            ensure!(args.len() == 1, "usage: save <wall>");
            SessionInput::Save {
                wall: parse_index(args[0], "wall")?,
            }
        }
        "quit" | "exit" => SessionInput::Quit,
        other => bail!("unknown command {:?}", other),
    };
    Ok(Some(input))
}

fn parse_field(name: &str) -> anyhow::Result<Field> {
    match name {
        "wall-width" => Ok(Field::WallWidth),
        "wall-height" => Ok(Field::WallHeight),
        "crate-width" => Ok(Field::CrateWidth),
        "crate-height" => Ok(Field::CrateHeight),
        other => bail!(
            "unknown field {:?} (wall-width, wall-height, crate-width, crate-height)",
            other
        ),
    }
}

fn parse_layout(name: &str) -> anyhow::Result<Layout> {
    // Hard error at the boundary: anything but the 8 known names is refused.
    Layout::from_name(name).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown layout {:?} (expected one of {})",
            name,
            ALL_LAYOUTS.map(|l| l.name()).join(", ")
        )
    })
}

fn parse_index(value: &str, what: &str) -> anyhow::Result<usize> {
    value
        .parse()
        .with_context(|| format!("{} index {:?} is not a non-negative integer", what, value))
}

/// The application state behind the event loop.
pub struct Session {
    config: Config,
    walls: Vec<Wall>,
    form: WallForm,
    /// The color the next paint applies; passed by value into each paint
    /// rather than shared with the crates.
    active_color: Rgb,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let form = WallForm::with_values(
            config.defaults.wall_width,
            config.defaults.wall_height,
            config.defaults.crate_width,
            config.defaults.crate_height,
            config.defaults.layout,
        );
        Session {
            config,
            walls: Vec::new(),
            form,
            active_color: DEFAULT_PAINT,
        }
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn active_color(&self) -> Rgb {
        self.active_color
    }

    pub fn form(&self) -> &WallForm {
        &self.form
    }

    /// Processes one user action to completion.
    pub fn process(&mut self, input: SessionInput) -> anyhow::Result<SessionStatus> {
        debug!("session input: {:?}", input);
        match input {
            SessionInput::SetField { field, value } => {
                let status = self.form.set_field(field, &value);
                println!("{}: {}", field.label(), status);
                if status != FieldStatus::Valid {
                    info!("form field {} is {}", field.label(), status);
                }
            }
            SessionInput::SelectLayout(layout) => {
                self.form.set_layout(layout);
                println!("default layout: {}", layout);
            }
            SessionInput::CreateWall => self.create_wall()?,
            SessionInput::ListWalls => {
                for (i, wall) in self.walls.iter().enumerate() {
                    println!(
                        "{}: {:?} {}x{} crates of {}x{} pixels",
                        i,
                        wall.name(),
                        wall.width(),
                        wall.height(),
                        wall.crate_width(),
                        wall.crate_height()
                    );
                }
                if self.walls.is_empty() {
                    println!("no walls yet");
                }
            }
            SessionInput::ShowWall { wall } => self.show_wall(wall)?,
            SessionInput::SelectColor(color) => {
                self.active_color = color;
                println!("active color: {}", color);
            }
            SessionInput::Paint {
                wall,
                crate_index,
                row,
                col,
            } => {
                let color = self.active_color;
                self.crate_mut(wall, crate_index)?.paint(row, col, color)?;
            }
            SessionInput::PaintExtra { wall, crate_index } => {
                let color = self.active_color;
                self.crate_mut(wall, crate_index)?.paint_extra_pixel(color)?;
            }
            SessionInput::SetChain {
                wall,
                crate_index,
                position,
            } => {
                let max_position = self.wall(wall)?.crate_count() - 1;
                self.crate_mut(wall, crate_index)?
                    .set_chain(position, max_position)?;
            }
            SessionInput::SetLayout {
                wall,
                crate_index,
                layout,
            } => {
                self.crate_mut(wall, crate_index)?.set_layout(layout);
            }
            SessionInput::SetExtraPixel {
                wall,
                crate_index,
                enabled,
            } => {
                self.crate_mut(wall, crate_index)?.set_extra_pixel(enabled);
            }
            SessionInput::Save { wall } => {
                let path = self.save_wall(wall)?;
                println!("saved {}", path.display());
            }
            SessionInput::Quit => {
                info!("session quit requested");
                return Ok(SessionStatus::Shutdown);
            }
        }
        Ok(SessionStatus::Running)
    }

    /// Creates a wall from the form, blocked until every field is valid.
    fn create_wall(&mut self) -> anyhow::Result<()> {
        let spec = match self.form.build() {
            Some(spec) => spec,
            None => {
                let bad: Vec<String> = Field::ALL
                    .iter()
                    .filter(|&&f| self.form.status(f) != FieldStatus::Valid)
                    .map(|&f| format!("{} is {}", f.label(), self.form.status(f)))
                    .collect();
                bail!("all crate and wall values must be valid: {}", bad.join(", "));
            }
        };
        let name = format!("Wall {}", self.walls.len());
        let wall = Wall::new(
            name.clone(),
            spec.wall_width,
            spec.wall_height,
            spec.crate_width,
            spec.crate_height,
            spec.layout,
        );
        info!(
            "created {:?}: {} crates, layout {}",
            name,
            wall.crate_count(),
            spec.layout
        );
        println!("created {:?} (wall {})", name, self.walls.len());
        self.walls.push(wall);
        Ok(())
    }

    fn show_wall(&self, index: usize) -> anyhow::Result<()> {
        let wall = self.wall(index)?;
        println!(
            "{:?}: {}x{} crates of {}x{} pixels",
            wall.name(),
            wall.width(),
            wall.height(),
            wall.crate_width(),
            wall.crate_height()
        );
        for (i, c) in wall.crates().iter().enumerate() {
            println!(
                "  crate {}: layout {}, chain {}, {} slots{}",
                i,
                c.layout(),
                c.chain().to_raw(),
                c.buffer_len(),
                if c.extra_pixel() { " (extra pixel)" } else { "" }
            );
        }
        Ok(())
    }

    fn save_wall(&self, index: usize) -> anyhow::Result<PathBuf> {
        let wall = self.wall(index)?;
        serializer::write(wall, &self.config.output.directory)
            .with_context(|| format!("failed to save {:?}", wall.name()))
    }

    fn wall(&self, index: usize) -> anyhow::Result<&Wall> {
        match self.walls.get(index) {
            Some(wall) => Ok(wall),
            None => bail!("no wall {} ({} walls exist)", index, self.walls.len()),
        }
    }

    fn crate_mut(
        &mut self,
        wall: usize,
        crate_index: usize,
    ) -> anyhow::Result<&mut crate::wall::Crate> {
        let wall_count = self.walls.len();
        let wall = match self.walls.get_mut(wall) {
            Some(w) => w,
            None => bail!("no wall {} ({} walls exist)", wall, wall_count),
        };
        let crate_count = wall.crate_count();
        match wall.crate_at_mut(crate_index) {
            Some(c) => Ok(c),
            None => bail!(
                "no crate {} in this wall ({} crates exist)",
                crate_index,
                crate_count
            ),
        }
    }
}

#[cfg(test)]
mod tests;
