//! Reads of window and screen state.
use std::ffi::{CStr, CString};
use std::os::raw::{c_int, c_long, c_uint, c_ulong};
use std::ptr;
use std::slice;

use x11_dl::{xinerama, xlib};

use super::{XWrap, MAX_PROPERTY_VALUE_LEN};
use crate::models::{NormalHints, Rect};

impl XWrap {
    pub fn get_window_attrs(
        &self,
        window: xlib::Window,
    ) -> Result<xlib::XWindowAttributes, ()> {
        let mut attrs: xlib::XWindowAttributes = unsafe { std::mem::zeroed() };
        let status = unsafe { (self.xlib.XGetWindowAttributes)(self.display, window, &mut attrs) };
        if status == 0 {
            return Err(());
        }
        Ok(attrs)
    }

    /// Resolve a color name or `#rrggbb` string to a pixel. Allocation
    /// failure is a fatal startup error.
    pub fn get_color(&self, color: &str) -> c_ulong {
        unsafe {
            let screen = (self.xlib.XDefaultScreen)(self.display);
            let colormap = (self.xlib.XDefaultColormap)(self.display, screen);
            let name = CString::new(color).unwrap_or_default();
            let mut color_def: xlib::XColor = std::mem::zeroed();
            let mut exact: xlib::XColor = std::mem::zeroed();
            let status = (self.xlib.XAllocNamedColor)(
                self.display,
                colormap,
                name.as_ptr(),
                &mut color_def,
                &mut exact,
            );
            assert!(status != 0, "cannot allocate color {color}");
            color_def.pixel
        }
    }

    /// Monitor geometries, one rect per output. Falls back to the whole
    /// root window when Xinerama is absent or inactive.
    pub fn get_screens(&self) -> Vec<Rect> {
        if let Ok(xin) = xinerama::Xlib::open() {
            if unsafe { (xin.XineramaIsActive)(self.display) } > 0 {
                let mut count = 0;
                let info = unsafe { (xin.XineramaQueryScreens)(self.display, &mut count) };
                if !info.is_null() {
                    let screens = unsafe { slice::from_raw_parts(info, count as usize) };
                    let mut rects: Vec<Rect> = Vec::new();
                    for screen in screens {
                        let rect = Rect::new(
                            screen.x_org.into(),
                            screen.y_org.into(),
                            screen.width.into(),
                            screen.height.into(),
                        );
                        // Mirrored outputs report the same geometry
                        // twice.
                        if !rects.contains(&rect) {
                            rects.push(rect);
                        }
                    }
                    unsafe {
                        (self.xlib.XFree)(info.cast());
                    }
                    if !rects.is_empty() {
                        return rects;
                    }
                }
            }
        }
        let (width, height) = self.get_root_dimensions();
        vec![Rect::new(0, 0, width, height)]
    }

    pub fn get_root_dimensions(&self) -> (i32, i32) {
        unsafe {
            let screen = (self.xlib.XDefaultScreen)(self.display);
            (
                (self.xlib.XDisplayWidth)(self.display, screen),
                (self.xlib.XDisplayHeight)(self.display, screen),
            )
        }
    }

    pub fn get_cursor_point(&self) -> Option<(i32, i32)> {
        let mut root_return: xlib::Window = 0;
        let mut child_return: xlib::Window = 0;
        let mut root_x = 0;
        let mut root_y = 0;
        let mut win_x = 0;
        let mut win_y = 0;
        let mut mask = 0;
        let found = unsafe {
            (self.xlib.XQueryPointer)(
                self.display,
                self.root,
                &mut root_return,
                &mut child_return,
                &mut root_x,
                &mut root_y,
                &mut win_x,
                &mut win_y,
                &mut mask,
            )
        };
        (found > 0).then_some((root_x, root_y))
    }

    /// Every direct child of the root, bottom to top.
    pub fn get_windows_for_root(&self) -> Vec<xlib::Window> {
        unsafe {
            let mut root_return: xlib::Window = 0;
            let mut parent: xlib::Window = 0;
            let mut children: *mut xlib::Window = ptr::null_mut();
            let mut count: c_uint = 0;
            let status = (self.xlib.XQueryTree)(
                self.display,
                self.root,
                &mut root_return,
                &mut parent,
                &mut children,
                &mut count,
            );
            if status == 0 || children.is_null() {
                return Vec::new();
            }
            let windows = slice::from_raw_parts(children, count as usize).to_vec();
            (self.xlib.XFree)(children.cast());
            windows
        }
    }

    /// A 32-bit-format property as longs, or nothing when absent or of
    /// the wrong type.
    pub fn get_property(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        r#type: xlib::Atom,
    ) -> Option<Vec<c_long>> {
        unsafe {
            let mut actual_type: xlib::Atom = 0;
            let mut actual_format: c_int = 0;
            let mut nitems: c_ulong = 0;
            let mut bytes_after: c_ulong = 0;
            let mut prop: *mut u8 = ptr::null_mut();
            let status = (self.xlib.XGetWindowProperty)(
                self.display,
                window,
                property,
                0,
                MAX_PROPERTY_VALUE_LEN / 4,
                xlib::False,
                r#type,
                &mut actual_type,
                &mut actual_format,
                &mut nitems,
                &mut bytes_after,
                &mut prop,
            );
            if status != i32::from(xlib::Success) || prop.is_null() {
                return None;
            }
            let data = slice::from_raw_parts(prop.cast::<c_long>(), nitems as usize).to_vec();
            (self.xlib.XFree)(prop.cast());
            Some(data)
        }
    }

    /// The ICCCM WM_STATE value (withdrawn/normal/iconic).
    pub fn get_wm_state(&self, window: xlib::Window) -> Option<c_long> {
        self.get_property(window, self.atoms.WMState, self.atoms.WMState)?
            .first()
            .copied()
    }

    pub fn get_window_states_atoms(&self, window: xlib::Window) -> Vec<xlib::Atom> {
        self.get_property(window, self.atoms.NetWMState, xlib::XA_ATOM)
            .unwrap_or_default()
            .iter()
            .map(|&atom| atom as xlib::Atom)
            .collect()
    }

    pub fn get_window_type(&self, window: xlib::Window) -> xlib::Atom {
        self.get_property(window, self.atoms.NetWMWindowType, xlib::XA_ATOM)
            .and_then(|atoms| atoms.first().map(|&atom| atom as xlib::Atom))
            .unwrap_or(0)
    }

    fn get_text_prop(&self, window: xlib::Window, atom: xlib::Atom) -> Option<String> {
        unsafe {
            let mut prop: xlib::XTextProperty = std::mem::zeroed();
            let status = (self.xlib.XGetTextProperty)(self.display, window, &mut prop, atom);
            if status == 0 || prop.value.is_null() || prop.nitems == 0 {
                return None;
            }
            let text = CStr::from_ptr(prop.value.cast())
                .to_string_lossy()
                .into_owned();
            (self.xlib.XFree)(prop.value.cast());
            Some(text)
        }
    }

    pub fn get_window_name(&self, window: xlib::Window) -> Option<String> {
        self.get_text_prop(window, self.atoms.NetWMName)
            .or_else(|| self.get_text_prop(window, xlib::XA_WM_NAME))
    }

    /// `(class, instance)` from WM_CLASS.
    pub fn get_class_hint(&self, window: xlib::Window) -> Option<(String, String)> {
        unsafe {
            let mut hint: xlib::XClassHint = std::mem::zeroed();
            if (self.xlib.XGetClassHint)(self.display, window, &mut hint) == 0 {
                return None;
            }
            let read = |ptr: *mut std::os::raw::c_char| {
                if ptr.is_null() {
                    String::new()
                } else {
                    CStr::from_ptr(ptr).to_string_lossy().into_owned()
                }
            };
            let class = read(hint.res_class);
            let instance = read(hint.res_name);
            if !hint.res_class.is_null() {
                (self.xlib.XFree)(hint.res_class.cast());
            }
            if !hint.res_name.is_null() {
                (self.xlib.XFree)(hint.res_name.cast());
            }
            Some((class, instance))
        }
    }

    pub fn get_transient_for(&self, window: xlib::Window) -> Option<xlib::Window> {
        let mut transient: xlib::Window = 0;
        let status =
            unsafe { (self.xlib.XGetTransientForHint)(self.display, window, &mut transient) };
        (status > 0 && transient != 0).then_some(transient)
    }

    pub fn get_wm_hints(&self, window: xlib::Window) -> Option<xlib::XWMHints> {
        unsafe {
            let hints_ptr = (self.xlib.XGetWMHints)(self.display, window);
            if hints_ptr.is_null() {
                return None;
            }
            let hints = *hints_ptr;
            (self.xlib.XFree)(hints_ptr.cast());
            Some(hints)
        }
    }

    /// WM_NORMAL_HINTS decoded at the edge; absent fields stay `None`
    /// and the model applies its fallback rules.
    pub fn get_normal_hints(&self, window: xlib::Window) -> Option<NormalHints> {
        unsafe {
            let mut hints: xlib::XSizeHints = std::mem::zeroed();
            let mut supplied: c_long = 0;
            let status =
                (self.xlib.XGetWMNormalHints)(self.display, window, &mut hints, &mut supplied);
            if status == 0 {
                return None;
            }
            let set = |flag: c_long| hints.flags & flag != 0;
            Some(NormalHints {
                base: set(xlib::PBaseSize).then_some((hints.base_width, hints.base_height)),
                min: set(xlib::PMinSize).then_some((hints.min_width, hints.min_height)),
                max: set(xlib::PMaxSize).then_some((hints.max_width, hints.max_height)),
                inc: set(xlib::PResizeInc).then_some((hints.width_inc, hints.height_inc)),
                aspect: set(xlib::PAspect).then_some((
                    (hints.min_aspect.x, hints.min_aspect.y),
                    (hints.max_aspect.x, hints.max_aspect.y),
                )),
            })
        }
    }

    pub fn supports_protocol(&self, window: xlib::Window, protocol: xlib::Atom) -> bool {
        unsafe {
            let mut protocols: *mut xlib::Atom = ptr::null_mut();
            let mut count: c_int = 0;
            if (self.xlib.XGetWMProtocols)(self.display, window, &mut protocols, &mut count) == 0
                || protocols.is_null()
            {
                return false;
            }
            let found = slice::from_raw_parts(protocols, count as usize).contains(&protocol);
            (self.xlib.XFree)(protocols.cast());
            found
        }
    }
}
