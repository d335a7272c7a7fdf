#![cfg(feature = "egui")]

use std::time::Duration;

use eframe::egui::{self, Color32, RichText, Sense};

use super::canvas::{EguiCanvas, to_color32};
use super::state::NetlistApp;
use super::text::highlight_query_job;
use crate::geometry::{Point, Rect};
use crate::model::ElementKind;

/// egui reports wheel input in points; one notch of a typical mouse wheel.
const POINTS_PER_NOTCH: f32 = 50.0;

pub fn update(app: &mut NetlistApp, ctx: &egui::Context) {
    app.poll();
    if app.session.has_pending() {
        ctx.request_repaint_after(Duration::from_millis(30));
    }

    let mut navigate_to: Option<String> = None;
    let mut go_up = false;
    let mut clear_search = false;
    let crumbs = app.breadcrumb();

    egui::TopBottomPanel::top("top").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let up = ui.add_enabled(!crumbs.is_empty(), egui::Button::new("⬆ Up"));
            if up.clicked() {
                go_up = true;
            }
            ui.separator();
            ui.label(RichText::new("Path:").strong());
            if ui.link("top").clicked() && !crumbs.is_empty() {
                navigate_to = Some(String::new());
            }
            for (i, name) in crumbs.iter().enumerate() {
                ui.label("›");
                if ui.link(name).clicked() {
                    navigate_to = Some(crumbs[..=i].join(" "));
                }
            }
            if let Some(status) = &app.status {
                ui.separator();
                ui.label(RichText::new(status).italics());
            }
        });
        ui.horizontal(|ui| {
            let resp = ui.add(
                egui::TextEdit::singleline(&mut app.search_query)
                    .hint_text("Search instances by name…"),
            );
            if resp.changed() {
                app.update_search_matches();
            }
        });
        if !app.search_query.trim().is_empty() && !app.search_matches.is_empty() {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                    for p in &app.search_matches {
                        let job = highlight_query_job(p, &app.search_query);
                        let resp = ui.add(egui::Label::new(job).sense(Sense::click()));
                        if resp.clicked() {
                            navigate_to = Some(p.clone());
                            clear_search = true;
                        }
                    }
                });
            });
        }
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        let avail = ui.available_rect_before_wrap();
        let resp = ui.interact(avail, ui.id().with("canvas"), Sense::click_and_drag());
        let renderer = app.session.renderer_mut();
        renderer.set_viewport(Rect::from_min_max(
            Point::new(avail.left(), avail.top()),
            Point::new(avail.right(), avail.bottom()),
        ));

        if resp.dragged() {
            let d = resp.drag_delta();
            renderer.pan(d.x, d.y);
        }
        let scroll_y = ui.input(|i| i.raw_scroll_delta.y);
        if scroll_y != 0.0 && resp.hovered() {
            let pointer = resp.hover_pos().unwrap_or(avail.center());
            renderer.wheel(scroll_y / POINTS_PER_NOTCH, Point::new(pointer.x, pointer.y));
        }

        let typing = ui.ctx().wants_keyboard_input();
        if !typing && ui.input(|i| i.key_pressed(egui::Key::F)) {
            app.session.zoom_to_extents();
        }
        if !typing && ui.input(|i| i.key_pressed(egui::Key::Backspace)) {
            go_up = true;
        }

        let painter = ui.painter_at(avail);
        painter.rect_filled(avail, 0.0, Color32::WHITE);
        let styles = &*app.styles;
        app.session.render(&mut EguiCanvas::new(&painter), styles);

        if resp.clicked() {
            if let Some(pos) = resp.interact_pointer_pos() {
                let action = app.session.tap(Point::new(pos.x, pos.y));
                app.handle_tap(action);
            }
        }

        egui::Area::new("zoom_controls".into())
            .fixed_pos(egui::Pos2::new(avail.left() + 8.0, avail.top() + 8.0))
            .show(ui.ctx(), |ui| {
                egui::Frame::menu(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let center = Point::new(avail.center().x, avail.center().y);
                        if ui.small_button("−").clicked() {
                            app.session.renderer_mut().wheel(-1.0, center);
                        }
                        if ui.small_button("+").clicked() {
                            app.session.renderer_mut().wheel(1.0, center);
                        }
                        if ui.small_button("Fit").clicked() {
                            app.session.zoom_to_extents();
                        }
                        let percent = (app.session.renderer().transform().scale * 100.0).round();
                        ui.label(format!("{}%", percent as i64));
                    });
                });
            });
    });

    show_info_window(app, ctx);

    if clear_search {
        app.search_query.clear();
        app.search_matches.clear();
    }
    if let Some(path) = navigate_to {
        app.navigate_to_path(&path);
    } else if go_up {
        app.go_up();
    }
}

/// Properties of the tapped element.
pub fn show_info_window(app: &mut NetlistApp, ctx: &egui::Context) {
    let Some(info) = &mut app.info else {
        return;
    };
    let mut open = info.open;
    let e = &info.element;
    egui::Window::new(info.title.clone())
        .open(&mut open)
        .resizable(true)
        .show(ctx, |ui| {
            egui::Grid::new("element_info").num_columns(2).show(ui, |ui| {
                let mut row = |k: &str, v: &str| {
                    if !v.is_empty() {
                        ui.label(RichText::new(k).strong());
                        ui.label(v);
                        ui.end_row();
                    }
                };
                row("Kind", &format!("{:?}", e.kind));
                row("Cell", &e.cell_name);
                row("Cell type", &e.cell_type);
                row("Path", &e.hierarchy_path);
                row("Source", &e.source_location);
                if e.kind == ElementKind::Edge {
                    row("Signal", &e.signal_name);
                    row("Signal type", &e.signal_type);
                    row("Index", &e.index_in_signal.to_string());
                }
                if e.kind == ElementKind::Label {
                    row("Text", &e.text);
                }
            });
            if e.highlighted {
                ui.colored_label(to_color32(app.styles.highlight().stroke), "highlighted");
            }
        });
    info.open = open;
    if !open {
        app.info = None;
    }
}
