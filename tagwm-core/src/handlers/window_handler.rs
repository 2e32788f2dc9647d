use super::{Client, ClientChange, Config, Manager, State, TagMask, WmStateAction};
use crate::display_action::DisplayAction;
use crate::display_event::ConfigureRequest;
use crate::display_servers::DisplayServer;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Start managing a window the server reported. Transients inherit
    /// their parent's monitor and tags; everything else is placed by
    /// the window rules. The window is mapped only after its final
    /// geometry is settled, so it never flashes at the wrong place.
    pub fn window_created_handler(&mut self, mut client: Client) -> bool {
        if self.state.client(client.handle).is_some() {
            return false;
        }
        tracing::debug!("managing window {:?}", client.handle);
        setup_new_client(&self.state, &mut client);
        let handle = client.handle;
        let monitor = client.monitor;
        let floating = client.is_floating;
        let geometry = client.geometry;
        let border_width = client.border_width;
        self.state.clients.push(client);
        self.state.actions.push_back(DisplayAction::MoveResizeWindow {
            handle,
            geometry,
            border_width,
        });
        self.state.actions.push_back(DisplayAction::SetWindowBorder {
            handle,
            focused: false,
        });
        self.state.actions.push_back(DisplayAction::SendConfigureNotify {
            handle,
            geometry,
            border_width,
        });
        self.state.actions.push_back(DisplayAction::GrabButtons {
            handle,
            focused: false,
        });
        if floating {
            self.state.actions.push_back(DisplayAction::RaiseWindow(handle));
        }
        self.state.attach(handle);
        self.state.attach_stack(handle);
        if monitor == self.state.selected_monitor {
            if let Some(previous) = self.state.monitors[monitor].selected {
                self.state.unfocus(previous, false);
            }
        }
        self.state.monitors[monitor].selected = Some(handle);
        self.state.arrange(Some(monitor));
        self.state.actions.push_back(DisplayAction::AddedWindow(handle));
        self.state.focus(None);
        true
    }

    /// The window was unmapped but still exists; return it to the
    /// withdrawn state it asked for.
    pub fn window_unmapped_handler(&mut self, handle: super::WindowHandle) -> bool {
        unmanage(&mut self.state, handle, false)
    }

    pub fn window_destroyed_handler(&mut self, handle: super::WindowHandle) -> bool {
        unmanage(&mut self.state, handle, true)
    }

    /// Fold a property report into the client it belongs to.
    pub fn window_changed_handler(&mut self, change: ClientChange) -> bool {
        let handle = change.handle;
        if self.state.client(handle).is_none() {
            return false;
        }
        if let Some(hints) = change.hints {
            if let Some(client) = self.state.client_mut(handle) {
                client.update_size_hints(Some(hints));
            }
        }
        if let Some(never_focus) = change.never_focus {
            if let Some(client) = self.state.client_mut(handle) {
                client.never_focus = never_focus;
            }
        }
        if let Some(urgent) = change.urgent {
            let focused =
                self.state.monitors[self.state.selected_monitor].selected == Some(handle);
            if urgent && focused {
                // The focused window never shows as urgent; scrub the
                // hint off the window instead of flagging it.
                self.state.actions.push_back(DisplayAction::SetUrgency {
                    handle,
                    urgent: false,
                });
            } else if let Some(client) = self.state.client_mut(handle) {
                client.is_urgent = urgent;
            }
            self.state.update_bars();
        }
        if let Some(title) = change.title {
            if let Some(client) = self.state.client_mut(handle) {
                client.set_name(&title);
            }
            if let Some(monitor) = self.state.client(handle).map(|c| c.monitor) {
                if self.state.monitors[monitor].selected == Some(handle) {
                    self.state.update_bar(monitor);
                }
            }
        }
        if let Some(parent) = change.transient_for {
            let parent_managed = self.state.client(parent).is_some();
            let was_floating = self
                .state
                .client(handle)
                .map_or(true, |c| c.is_floating);
            let monitor = self.state.client(handle).map(|c| c.monitor);
            if let Some(client) = self.state.client_mut(handle) {
                client.transient_for = Some(parent);
            }
            if !was_floating && parent_managed {
                if let Some(client) = self.state.client_mut(handle) {
                    client.is_floating = true;
                }
                if let Some(monitor) = monitor {
                    self.state.arrange(Some(monitor));
                }
            }
        }
        if change.is_dialog {
            if let Some(client) = self.state.client_mut(handle) {
                client.is_floating = true;
            }
        }
        if let Some(action) = change.fullscreen {
            let current = self
                .state
                .client(handle)
                .map_or(false, |c| c.is_fullscreen);
            let fullscreen = match action {
                WmStateAction::Add => true,
                WmStateAction::Remove => false,
                WmStateAction::Toggle => !current,
            };
            self.state.set_fullscreen(handle, fullscreen);
        }
        if change.attention {
            let selected = self.state.monitors[self.state.selected_monitor].selected;
            let urgent = self.state.client(handle).map_or(true, |c| c.is_urgent);
            if selected != Some(handle) && !urgent {
                self.state.set_urgent(handle, true);
            }
        }
        true
    }

    /// A managed window asked for a new geometry. Floating windows get
    /// what they asked for, clamped to stay reachable; tiled windows
    /// under an arranging layout only receive a notify restating the
    /// geometry the layout gave them.
    pub fn configure_request_handler(&mut self, request: ConfigureRequest) -> bool {
        let handle = request.handle;
        let Some((monitor, floating)) = self
            .state
            .client(handle)
            .map(|c| (c.monitor, c.is_floating))
        else {
            return false;
        };
        let arranges =
            self.state.monitors[self.state.selected_monitor].layout().arranges();
        if let Some(border_width) = request.border_width {
            if let Some(client) = self.state.client_mut(handle) {
                client.border_width = border_width;
            }
        } else if floating || !arranges {
            let screen = self.state.monitors[monitor].geometry;
            if let Some(client) = self.state.client_mut(handle) {
                if let Some(x) = request.x {
                    client.old_geometry.x = client.geometry.x;
                    client.geometry.x = screen.x + x;
                }
                if let Some(y) = request.y {
                    client.old_geometry.y = client.geometry.y;
                    client.geometry.y = screen.y + y;
                }
                if let Some(w) = request.w {
                    client.old_geometry.w = client.geometry.w;
                    client.geometry.w = w;
                }
                if let Some(h) = request.h {
                    client.old_geometry.h = client.geometry.h;
                    client.geometry.h = h;
                }
                if client.geometry.x + client.geometry.w > screen.right() && client.is_floating
                {
                    client.geometry.x =
                        screen.x + (screen.w / 2 - client.total_width() / 2);
                }
                if client.geometry.y + client.geometry.h > screen.bottom() && client.is_floating
                {
                    client.geometry.y =
                        screen.y + (screen.h / 2 - client.total_height() / 2);
                }
            }
            let Some((geometry, border_width)) = self
                .state
                .client(handle)
                .map(|c| (c.geometry, c.border_width))
            else {
                return false;
            };
            if request.moves_only() {
                self.state.actions.push_back(DisplayAction::SendConfigureNotify {
                    handle,
                    geometry,
                    border_width,
                });
            }
            if self.state.is_visible(handle) {
                self.state.actions.push_back(DisplayAction::MoveResizeWindow {
                    handle,
                    geometry,
                    border_width,
                });
            }
        } else {
            let Some((geometry, border_width)) = self
                .state
                .client(handle)
                .map(|c| (c.geometry, c.border_width))
            else {
                return false;
            };
            self.state.actions.push_back(DisplayAction::SendConfigureNotify {
                handle,
                geometry,
                border_width,
            });
        }
        true
    }
}

/// Assign monitor, tags, border, and the floating flag for a window we
/// are about to manage, and pull its starting geometry inside the
/// monitor's usable area.
fn setup_new_client(state: &State, client: &mut Client) {
    let parent = client
        .transient_for
        .and_then(|t| state.client(t))
        .map(|p| (p.monitor, p.tags));
    if let Some((monitor, tags)) = parent {
        client.monitor = monitor;
        client.tags = tags;
    } else {
        client.monitor = state.selected_monitor;
        apply_rules(state, client);
    }
    let area = state.monitors[client.monitor].window_area;
    if client.geometry.x + client.total_width() > area.right() {
        client.geometry.x = area.right() - client.total_width();
    }
    if client.geometry.y + client.total_height() > area.bottom() {
        client.geometry.y = area.bottom() - client.total_height();
    }
    client.geometry.x = client.geometry.x.max(area.x);
    client.geometry.y = client.geometry.y.max(area.y);
    client.border_width = state.border_width;
    if !client.is_floating {
        client.is_floating = client.transient_for.is_some() || client.is_fixed;
        client.old_floating = client.is_floating;
    }
}

/// Run the placement rules over a fresh client. Matching rules OR their
/// tags together; the floating flag and monitor take the last match.
/// A client no rule tagged lands on its monitor's current view.
fn apply_rules(state: &State, client: &mut Client) {
    client.is_floating = false;
    client.tags = TagMask::new(0);
    for rule in &state.rules {
        if rule.matches(&client.class, &client.instance, &client.name) {
            client.is_floating = rule.floating;
            client.tags = client.tags | rule.tags;
            if let Some(monitor) = rule.monitor.filter(|&m| m < state.monitors.len()) {
                client.monitor = monitor;
            }
        }
    }
    let tag_space = TagMask::all(state.tag_names.len());
    client.tags = if client.tags.intersects(tag_space) {
        client.tags & tag_space
    } else {
        state.monitors[client.monitor].view_tagset()
    };
}

/// Stop managing a window. `destroyed` windows are already gone on the
/// server side; the rest get their original border back and are
/// returned to the withdrawn state.
fn unmanage(state: &mut State, handle: super::WindowHandle, destroyed: bool) -> bool {
    let Some((monitor, border_width)) = state
        .client(handle)
        .map(|c| (c.monitor, c.old_border_width))
    else {
        return false;
    };
    tracing::debug!("unmanaging window {:?}", handle);
    state.detach(handle);
    state.detach_stack(handle);
    if !destroyed {
        state.actions.push_back(DisplayAction::TeardownWindow {
            handle,
            border_width,
        });
    }
    state.clients.retain(|c| c.handle != handle);
    state.focus(None);
    state.update_client_list();
    state.arrange(Some(monitor));
    true
}
