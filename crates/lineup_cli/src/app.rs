use std::io::Write;

use anyhow::{Context, Result};
use lineup_core::crop::PanOffset;
use lineup_core::{
    export_lineup_json, export_lineup_png, CropRequest, FieldPos, LineupEditor, LineupError, LineupStore,
    PlayerDraft,
};
use tracing::warn;

use crate::config::CliConfig;
use crate::Command;

/// What a command touched, so only that record is rewritten
#[derive(Debug, PartialEq)]
enum Changed {
    Nothing,
    Team,
    Settings,
}

pub fn run(config: &CliConfig, command: Command, out: &mut impl Write) -> Result<()> {
    let store = LineupStore::new(&config.data_dir);
    let mut editor = LineupEditor::new(store.load_team(), store.load_settings());

    let changed = match execute(&mut editor, command, out) {
        Ok(changed) => changed,
        Err(err) => match err.downcast_ref::<LineupError>() {
            Some(lineup_err) if lineup_err.is_ignorable() => {
                warn!(error = %lineup_err, "command ignored");
                writeln!(out, "No change: {}", lineup_err)?;
                Changed::Nothing
            }
            _ => return Err(err),
        },
    };

    match changed {
        Changed::Team => store.save_team(editor.team()).context("saving team")?,
        Changed::Settings => store.save_settings(editor.settings()).context("saving settings")?,
        Changed::Nothing => {}
    }
    Ok(())
}

fn execute(editor: &mut LineupEditor, command: Command, out: &mut impl Write) -> Result<Changed> {
    match command {
        Command::Formations => {
            let catalog = editor.catalog();
            writeln!(out, "{} formations", catalog.len())?;
            for size in catalog.squad_sizes() {
                writeln!(out, "{} players:", size)?;
                for formation in catalog.for_squad_size(size) {
                    let marker = if formation.id == editor.team().formation { "*" } else { " " };
                    writeln!(out, "  {} {:<6} {}", marker, formation.id, formation.name)?;
                }
            }
            Ok(Changed::Nothing)
        }

        Command::Show => {
            print_team(editor, out)?;
            Ok(Changed::Nothing)
        }

        Command::Add { name, position, jersey } => {
            let id = editor.add_player(PlayerDraft::new(name, position, jersey))?;
            writeln!(out, "Added player {}", id)?;
            Ok(Changed::Team)
        }

        Command::Edit { id, name, position, jersey } => {
            let current = editor
                .team()
                .player(&id)
                .ok_or_else(|| LineupError::PlayerNotFound { id: id.clone() })?;
            let mut draft = PlayerDraft::from_player(current);
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(position) = position {
                draft.position = position;
            }
            if let Some(jersey) = jersey {
                draft.jersey_number = jersey;
            }
            editor.update_player(&id, draft)?;
            writeln!(out, "Updated player {}", id)?;
            Ok(Changed::Team)
        }

        Command::Remove { id } => {
            let removed = editor.remove_player(&id)?;
            writeln!(out, "Removed {}", removed.name)?;
            Ok(Changed::Team)
        }

        Command::Assign { id, position } => {
            editor.set_player_position(&id, &position)?;
            Ok(Changed::Team)
        }

        Command::Move { id, x, y } => {
            let pos = editor.move_player(&id, FieldPos::new(x, y))?;
            writeln!(out, "Moved to ({:.1}, {:.1})", pos.x, pos.y)?;
            Ok(Changed::Team)
        }

        Command::Formation { id } => {
            editor.change_formation(&id)?;
            print_team(editor, out)?;
            Ok(Changed::Team)
        }

        Command::Rename { name } => {
            editor.rename_team(&name);
            Ok(Changed::Team)
        }

        Command::Rotate => {
            let rotated = editor.toggle_rotation();
            writeln!(out, "Field rotation {}", if rotated { "on" } else { "off" })?;
            Ok(Changed::Settings)
        }

        Command::Appearance { field_color, marker_color, player_size } => {
            let appearance = &mut editor.settings_mut().appearance;
            if let Some(color) = field_color {
                if !appearance.set_field_color(&color) {
                    anyhow::bail!("Invalid field color '{}', expected #rrggbb", color);
                }
            }
            if let Some(color) = marker_color {
                if !appearance.set_marker_color(&color) {
                    anyhow::bail!("Invalid marker color '{}', expected #rrggbb", color);
                }
            }
            if let Some(size) = player_size {
                appearance.set_player_size(size);
            }
            Ok(Changed::Settings)
        }

        Command::Photo { id, image, zoom, pan_x, pan_y } => {
            let bytes = std::fs::read(&image).with_context(|| format!("reading {}", image.display()))?;
            editor.set_profile_photo(&id, &bytes, CropRequest::new(zoom, PanOffset::new(pan_x, pan_y)))?;
            writeln!(out, "Photo set for {}", id)?;
            Ok(Changed::Team)
        }

        Command::ClearPhoto { id } => {
            editor.clear_profile_photo(&id)?;
            Ok(Changed::Team)
        }

        Command::ExportJson { out: dir } => {
            let export = export_lineup_json(editor.team())?;
            let path = dir.join(&export.file_name);
            std::fs::write(&path, export.contents).with_context(|| format!("writing {}", path.display()))?;
            writeln!(out, "Exported {}", path.display())?;
            Ok(Changed::Nothing)
        }

        Command::ExportImage { out: dir } => {
            let export = export_lineup_png(editor.team(), &editor.settings().appearance)?;
            let path = dir.join(&export.file_name);
            std::fs::write(&path, &export.png).with_context(|| format!("writing {}", path.display()))?;
            writeln!(out, "Exported {}", path.display())?;
            Ok(Changed::Nothing)
        }
    }
}

fn print_team(editor: &LineupEditor, out: &mut impl Write) -> Result<()> {
    let team = editor.team();
    writeln!(out, "{} [{}] - {} players", team.name, team.formation, team.players.len())?;
    for player in &team.players {
        let shown = editor.displayed_position(&player.id).unwrap_or_else(|| player.field_pos());
        writeln!(
            out,
            "  #{:<2} {:<20} {:<14} ({:>5.1}, {:>5.1})  {}",
            player.jersey_number, player.name, player.position, shown.x, shown.y, player.id
        )?;
    }
    Ok(())
}
