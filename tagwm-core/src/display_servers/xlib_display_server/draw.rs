//! Bar windows and the core-font canvas they are painted with. Each
//! bar owns an off-screen pixmap; a redraw paints the whole bar there
//! and copies it over in one operation.
use std::collections::HashMap;
use std::ffi::CString;
use std::os::raw::{c_int, c_uint, c_ulong};

use x11_dl::xlib;

use super::xwrap::XWrap;
use crate::config::MouseTarget;
use crate::display_servers::bar::{self, Canvas, Scheme};
use crate::models::{BarSnapshot, Rect, WindowHandle};

pub struct BarDraw {
    font: *mut xlib::XFontStruct,
    font_height: i32,
    gc: xlib::GC,
    surfaces: HashMap<xlib::Window, BarSurface>,
}

struct BarSurface {
    geometry: Rect,
    pixmap: xlib::Pixmap,
    snapshot: Option<BarSnapshot>,
}

impl BarDraw {
    /// Load the configured font, falling back to `fixed`. Having no
    /// usable font at all is a fatal startup error.
    pub fn new(xw: &XWrap, font_name: &str) -> Self {
        let font = load_font(xw, font_name);
        let (ascent, descent) = unsafe { ((*font).ascent, (*font).descent) };
        let gc = unsafe { (xw.xlib.XCreateGC)(xw.display, xw.root, 0, std::ptr::null_mut()) };
        Self {
            font,
            font_height: ascent + descent,
            gc,
            surfaces: HashMap::new(),
        }
    }

    pub fn bar_height(&self) -> i32 {
        self.font_height + 2
    }

    pub fn is_bar(&self, window: xlib::Window) -> bool {
        self.surfaces.contains_key(&window)
    }

    /// Create one bar window: override-redirect so we do not manage
    /// ourselves, listening only for presses and exposes.
    pub fn create_bar(&mut self, xw: &XWrap, geometry: Rect) -> xlib::Window {
        let window = unsafe {
            let screen = (xw.xlib.XDefaultScreen)(xw.display);
            let depth = (xw.xlib.XDefaultDepth)(xw.display, screen);
            let visual = (xw.xlib.XDefaultVisual)(xw.display, screen);
            let mut attrs: xlib::XSetWindowAttributes = std::mem::zeroed();
            attrs.override_redirect = xlib::True;
            attrs.background_pixmap = xlib::ParentRelative as xlib::Pixmap;
            attrs.event_mask = xlib::ButtonPressMask | xlib::ExposureMask;
            let window = (xw.xlib.XCreateWindow)(
                xw.display,
                xw.root,
                geometry.x,
                geometry.y,
                geometry.w.max(1) as c_uint,
                geometry.h.max(1) as c_uint,
                0,
                depth,
                xlib::CopyFromParent as c_uint,
                visual,
                xlib::CWOverrideRedirect | xlib::CWBackPixmap | xlib::CWEventMask,
                &mut attrs,
            );
            (xw.xlib.XDefineCursor)(xw.display, window, xw.cursors.normal);
            (xw.xlib.XMapRaised)(xw.display, window);
            window
        };
        let pixmap = create_pixmap(xw, geometry);
        self.surfaces.insert(
            window,
            BarSurface {
                geometry,
                pixmap,
                snapshot: None,
            },
        );
        window
    }

    pub fn move_resize_bar(&mut self, xw: &XWrap, window: xlib::Window, geometry: Rect) {
        let Some(surface) = self.surfaces.get_mut(&window) else {
            return;
        };
        unsafe {
            (xw.xlib.XMoveResizeWindow)(
                xw.display,
                window,
                geometry.x,
                geometry.y,
                geometry.w.max(1) as c_uint,
                geometry.h.max(1) as c_uint,
            );
        }
        if surface.geometry.w != geometry.w || surface.geometry.h != geometry.h {
            unsafe {
                (xw.xlib.XFreePixmap)(xw.display, surface.pixmap);
            }
            surface.pixmap = create_pixmap(xw, geometry);
        }
        surface.geometry = geometry;
        self.redraw(xw, window);
    }

    pub fn destroy_bar(&mut self, xw: &XWrap, window: xlib::Window) {
        let Some(surface) = self.surfaces.remove(&window) else {
            return;
        };
        unsafe {
            (xw.xlib.XFreePixmap)(xw.display, surface.pixmap);
            (xw.xlib.XDestroyWindow)(xw.display, window);
        }
    }

    /// Store the fresh snapshot for a bar and repaint it.
    pub fn refresh(&mut self, xw: &XWrap, snapshot: BarSnapshot) {
        let WindowHandle::XlibHandle(window) = snapshot.bar else {
            return;
        };
        let Some(surface) = self.surfaces.get_mut(&window) else {
            return;
        };
        surface.snapshot = Some(snapshot);
        self.redraw(xw, window);
    }

    /// Repaint a bar from its last snapshot, also the expose path.
    pub fn redraw(&mut self, xw: &XWrap, window: xlib::Window) {
        let Some(surface) = self.surfaces.get(&window) else {
            return;
        };
        let Some(snapshot) = surface.snapshot.clone() else {
            return;
        };
        let geometry = surface.geometry;
        let mut canvas = XCanvas::new(xw, self.font, self.font_height, self.gc, surface.pixmap);
        bar::draw_bar(&mut canvas, &snapshot, geometry.h);
        unsafe {
            (xw.xlib.XCopyArea)(
                xw.display,
                surface.pixmap,
                window,
                self.gc,
                0,
                0,
                geometry.w.max(1) as c_uint,
                geometry.h.max(1) as c_uint,
                0,
                0,
            );
        }
        xw.sync();
    }

    /// Resolve a press on a bar to its click region.
    pub fn click(
        &self,
        xw: &XWrap,
        window: xlib::Window,
        x: i32,
    ) -> Option<(MouseTarget, Option<usize>)> {
        let surface = self.surfaces.get(&window)?;
        let snapshot = surface.snapshot.as_ref()?;
        let canvas = XCanvas::new(xw, self.font, self.font_height, self.gc, surface.pixmap);
        Some(bar::click_target(&canvas, snapshot, x))
    }

    /// Free every surface plus the font and GC. Must run before the
    /// display connection closes.
    pub fn cleanup(&mut self, xw: &XWrap) {
        for (window, surface) in self.surfaces.drain() {
            unsafe {
                (xw.xlib.XFreePixmap)(xw.display, surface.pixmap);
                (xw.xlib.XDestroyWindow)(xw.display, window);
            }
        }
        unsafe {
            (xw.xlib.XFreeFont)(xw.display, self.font);
            (xw.xlib.XFreeGC)(xw.display, self.gc);
        }
    }
}

fn load_font(xw: &XWrap, name: &str) -> *mut xlib::XFontStruct {
    let load = |name: &str| {
        let cname = CString::new(name).unwrap_or_default();
        unsafe { (xw.xlib.XLoadQueryFont)(xw.display, cname.as_ptr()) }
    };
    let font = load(name);
    if !font.is_null() {
        return font;
    }
    tracing::warn!("cannot load font {name}, falling back to fixed");
    let font = load("fixed");
    assert!(!font.is_null(), "cannot load any font");
    font
}

fn create_pixmap(xw: &XWrap, geometry: Rect) -> xlib::Pixmap {
    unsafe {
        let screen = (xw.xlib.XDefaultScreen)(xw.display);
        let depth = (xw.xlib.XDefaultDepth)(xw.display, screen);
        (xw.xlib.XCreatePixmap)(
            xw.display,
            xw.root,
            geometry.w.max(1) as c_uint,
            geometry.h.max(1) as c_uint,
            depth as c_uint,
        )
    }
}

/// Core-font canvas over one pixmap.
struct XCanvas<'a> {
    xw: &'a XWrap,
    font: *mut xlib::XFontStruct,
    font_height: i32,
    gc: xlib::GC,
    drawable: xlib::Drawable,
    fg: c_ulong,
    bg: c_ulong,
}

impl<'a> XCanvas<'a> {
    fn new(
        xw: &'a XWrap,
        font: *mut xlib::XFontStruct,
        font_height: i32,
        gc: xlib::GC,
        drawable: xlib::Drawable,
    ) -> Self {
        Self {
            xw,
            font,
            font_height,
            gc,
            drawable,
            fg: xw.colors.normal.foreground,
            bg: xw.colors.normal.background,
        }
    }
}

impl Canvas for XCanvas<'_> {
    fn font_height(&self) -> i32 {
        self.font_height
    }

    fn text_width(&self, text: &str) -> i32 {
        unsafe { (self.xw.xlib.XTextWidth)(self.font, text.as_ptr().cast(), text.len() as c_int) }
    }

    fn select_scheme(&mut self, scheme: Scheme, invert: bool) {
        let pixels = match scheme {
            Scheme::Normal => self.xw.colors.normal,
            Scheme::Selected => self.xw.colors.selected,
        };
        (self.fg, self.bg) = if invert {
            (pixels.background, pixels.foreground)
        } else {
            (pixels.foreground, pixels.background)
        };
    }

    fn draw_text(&mut self, rect: Rect, left_pad: i32, text: &str) {
        self.fill_background(rect);
        // Plain truncation to what fits, no ellipsis.
        let available = rect.w - left_pad;
        let mut end = text.len();
        while end > 0 && self.text_width(&text[..end]) > available {
            end -= 1;
            while end > 0 && !text.is_char_boundary(end) {
                end -= 1;
            }
        }
        if end == 0 {
            return;
        }
        let visible = &text[..end];
        unsafe {
            let ascent = (*self.font).ascent;
            let descent = (*self.font).descent;
            let baseline = rect.y + (rect.h - (ascent + descent)) / 2 + ascent;
            (self.xw.xlib.XSetForeground)(self.xw.display, self.gc, self.fg);
            (self.xw.xlib.XSetFont)(self.xw.display, self.gc, (*self.font).fid);
            (self.xw.xlib.XDrawString)(
                self.xw.display,
                self.drawable,
                self.gc,
                rect.x + left_pad,
                baseline,
                visible.as_ptr().cast(),
                visible.len() as c_int,
            );
        }
    }

    fn draw_rect(&mut self, rect: Rect, filled: bool) {
        unsafe {
            (self.xw.xlib.XSetForeground)(self.xw.display, self.gc, self.fg);
            if filled {
                (self.xw.xlib.XFillRectangle)(
                    self.xw.display,
                    self.drawable,
                    self.gc,
                    rect.x,
                    rect.y,
                    rect.w.max(0) as c_uint,
                    rect.h.max(0) as c_uint,
                );
            } else {
                (self.xw.xlib.XDrawRectangle)(
                    self.xw.display,
                    self.drawable,
                    self.gc,
                    rect.x,
                    rect.y,
                    (rect.w - 1).max(0) as c_uint,
                    (rect.h - 1).max(0) as c_uint,
                );
            }
        }
    }

    fn fill_background(&mut self, rect: Rect) {
        unsafe {
            (self.xw.xlib.XSetForeground)(self.xw.display, self.gc, self.bg);
            (self.xw.xlib.XFillRectangle)(
                self.xw.display,
                self.drawable,
                self.gc,
                rect.x,
                rect.y,
                rect.w.max(0) as c_uint,
                rect.h.max(0) as c_uint,
            );
        }
    }
}
