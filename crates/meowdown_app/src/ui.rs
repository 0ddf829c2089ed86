//! The download form, rendered with egui. Widgets mutate `FormState`
//! directly; anything that should reach the core comes back as messages.

use eframe::egui;
use meowdown_core::{
    AppViewModel, AudioQuality, MediaFormat, Msg, Organization, QualityTier, SizeLimit,
};

use crate::form::FormState;

pub fn render(ui: &mut egui::Ui, form: &mut FormState, view: &AppViewModel) -> Vec<Msg> {
    let mut msgs = Vec::new();

    ui.vertical_centered(|ui| {
        ui.heading("🐱 MeowDown");
        ui.label("The purr-fectly adorable video downloader 🐾");
    });
    ui.separator();

    ui.label("🔗 Video URLs (one per line):");
    ui.add(
        egui::TextEdit::multiline(&mut form.url_input)
            .hint_text("https://youtube.com/watch?v=... *meow*")
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );

    ui.horizontal(|ui| {
        ui.label("📁 Download to:");
        ui.text_edit_singleline(&mut form.destination);
        if ui.button("📂 Browse").clicked() {
            if let Some(folder) = rfd::FileDialog::new()
                .set_directory(&form.destination)
                .pick_folder()
            {
                form.destination = folder.display().to_string();
            }
        }
    });

    ui.horizontal(|ui| {
        egui::ComboBox::from_label("🎚️ Format")
            .selected_text(form.format.label())
            .show_ui(ui, |ui| {
                for format in MediaFormat::ALL {
                    ui.selectable_value(&mut form.format, format, format.label());
                }
            });
        if form.format.is_audio() {
            egui::ComboBox::from_label("🎵 Audio quality")
                .selected_text(form.audio_quality.label())
                .show_ui(ui, |ui| {
                    for quality in AudioQuality::ALL {
                        ui.selectable_value(&mut form.audio_quality, quality, quality.label());
                    }
                });
        }
    });

    ui.horizontal(|ui| {
        ui.checkbox(&mut form.use_quality_tier, "Pick a video quality");
        if form.use_quality_tier {
            egui::ComboBox::from_id_source("quality_tier")
                .selected_text(form.quality.label())
                .show_ui(ui, |ui| {
                    for tier in QualityTier::ALL {
                        ui.selectable_value(&mut form.quality, tier, tier.label());
                    }
                });
        }
    });

    ui.collapsing("📜 Playlists & channels", |ui| {
        ui.checkbox(&mut form.is_playlist, "Download the whole playlist");
        ui.checkbox(&mut form.channel_mode, "Channel mode (latest uploads)");
        ui.horizontal(|ui| {
            ui.checkbox(&mut form.limit_enabled, "Limit items");
            if form.limit_enabled {
                ui.add(egui::DragValue::new(&mut form.limit).clamp_range(1..=500));
            }
        });
        ui.checkbox(&mut form.playlist_numbering, "Number the files (001, 002, ...)");
        if form.format == MediaFormat::Mp3Complete {
            ui.checkbox(&mut form.merge_playlist, "Merge tracks into one big mix 🎵");
        }
    });

    ui.collapsing("🔍 Filters", |ui| {
        ui.horizontal(|ui| {
            ui.checkbox(&mut form.duration_filter, "Duration between");
            if form.duration_filter {
                ui.add(egui::DragValue::new(&mut form.duration_min).clamp_range(0..=86_400));
                ui.label("and");
                ui.add(egui::DragValue::new(&mut form.duration_max).clamp_range(0..=86_400));
                ui.label("seconds");
            }
        });
        ui.horizontal(|ui| {
            ui.checkbox(&mut form.size_limit_enabled, "Max file size");
            if form.size_limit_enabled {
                egui::ComboBox::from_id_source("size_limit")
                    .selected_text(form.size_limit.label())
                    .show_ui(ui, |ui| {
                        for limit in SizeLimit::ALL {
                            ui.selectable_value(&mut form.size_limit, limit, limit.label());
                        }
                    });
            }
        });
        ui.checkbox(&mut form.skip_shorts, "Skip shorts (under a minute)");
    });

    ui.collapsing("🗂️ Organization & extras", |ui| {
        egui::ComboBox::from_label("Folder layout")
            .selected_text(form.organization.label())
            .show_ui(ui, |ui| {
                for organization in Organization::ALL {
                    ui.selectable_value(&mut form.organization, organization, organization.label());
                }
            });
        ui.checkbox(&mut form.write_metadata, "Write metadata file");
        ui.checkbox(&mut form.write_thumbnail, "Save thumbnail");
        ui.checkbox(&mut form.embed_metadata, "Embed metadata");
        ui.horizontal(|ui| {
            ui.label("Subtitles (comma separated):");
            ui.text_edit_singleline(&mut form.subtitles);
        });
        ui.horizontal(|ui| {
            ui.checkbox(&mut form.retries_enabled, "Retries");
            if form.retries_enabled {
                ui.add(egui::DragValue::new(&mut form.retries).clamp_range(1..=50));
            }
        });
        ui.checkbox(&mut form.use_archive, "Remember downloads (skip repeats)");
    });

    ui.separator();

    ui.vertical_centered(|ui| {
        let label = if view.busy() {
            "😻 Downloading..."
        } else {
            "😸 Download Meow!"
        };
        let button = egui::Button::new(label).min_size(egui::vec2(200.0, 32.0));
        if ui.add_enabled(!view.busy(), button).clicked() {
            msgs.push(Msg::DestinationChanged(form.destination.clone()));
            msgs.push(Msg::InputChanged(form.url_input.clone()));
            msgs.push(Msg::OptionsChanged(form.to_options()));
            msgs.push(Msg::DownloadClicked);
        }
    });

    ui.add(
        egui::ProgressBar::new(view.fraction)
            .show_percentage()
            .desired_width(f32::INFINITY),
    );
    if !view.status.is_empty() {
        ui.vertical_centered(|ui| {
            ui.label(&view.status);
        });
    }
    if view.queue_len > 1 && view.busy() {
        ui.vertical_centered(|ui| {
            ui.label(format!(
                "Item {} of {} • {} done, {} failed",
                (view.current_index + 1).min(view.queue_len),
                view.queue_len,
                view.completed,
                view.failed
            ));
        });
    }

    if !view.busy() && view.completed > 0 {
        ui.vertical_centered(|ui| {
            if ui.button("📁 Open Downloads").clicked() {
                open_folder(&form.destination);
            }
        });
    }

    msgs
}

fn open_folder(folder: &str) {
    let folder = folder.to_string();
    std::thread::spawn(move || {
        #[cfg(target_os = "windows")]
        {
            let _ = std::process::Command::new("explorer").arg(folder).spawn();
        }
        #[cfg(target_os = "macos")]
        {
            let _ = std::process::Command::new("open").arg(folder).spawn();
        }
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            let _ = std::process::Command::new("xdg-open").arg(folder).spawn();
        }
    });
}
