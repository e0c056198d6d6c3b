//! X11 implementation of [`WindowSource`] using EWMH root properties.
//!
//! Watches `_NET_ACTIVE_WINDOW` on the root window and reads the active
//! window's `_NET_WM_NAME` (UTF-8), falling back to `WM_NAME`.

use std::os::unix::io::AsRawFd;
use std::time::Duration;

use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    Atom, AtomEnum, ChangeWindowAttributesAux, ConnectionExt as _, EventMask, Window,
};
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;

use crate::core::focus::WindowSource;
use crate::error::{BarError, Result};

/// Longest window name read, in 32-bit units
const MAX_NAME_LEN: u32 = 1024;

struct Atoms {
    net_active_window: Atom,
    net_wm_name: Atom,
    utf8_string: Atom,
}

/// Connection to the X server, owned by the focus tracker
pub struct X11WindowSource {
    conn: RustConnection,
    root: Window,
    atoms: Atoms,
}

fn x11_err<E: std::fmt::Display>(e: E) -> BarError {
    BarError::display(e.to_string())
}

impl X11WindowSource {
    /// Connect to `$DISPLAY` and subscribe to root property changes.
    pub fn connect() -> Result<Self> {
        let (conn, screen_num) = RustConnection::connect(None).map_err(x11_err)?;
        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|s| s.root)
            .ok_or_else(|| BarError::display(format!("no screen {}", screen_num)))?;

        let intern = |name: &[u8]| -> Result<Atom> {
            Ok(conn
                .intern_atom(false, name)
                .map_err(x11_err)?
                .reply()
                .map_err(x11_err)?
                .atom)
        };
        let atoms = Atoms {
            net_active_window: intern(b"_NET_ACTIVE_WINDOW")?,
            net_wm_name: intern(b"_NET_WM_NAME")?,
            utf8_string: intern(b"UTF8_STRING")?,
        };

        conn.change_window_attributes(
            root,
            &ChangeWindowAttributesAux::new().event_mask(EventMask::PROPERTY_CHANGE),
        )
        .map_err(x11_err)?
        .check()
        .map_err(x11_err)?;
        conn.flush().map_err(x11_err)?;

        log::info!("Connected to X server, watching root window {:#x}", root);
        Ok(Self { conn, root, atoms })
    }

    fn active_window(&self) -> Result<Window> {
        let reply = self
            .conn
            .get_property(false, self.root, self.atoms.net_active_window, AtomEnum::WINDOW, 0, 1)
            .map_err(x11_err)?
            .reply()
            .map_err(x11_err)?;

        reply
            .value32()
            .and_then(|mut values| values.next())
            .filter(|w| *w != x11rb::NONE)
            .ok_or_else(|| BarError::display("no active window"))
    }

    fn window_name(&self, window: Window) -> Result<String> {
        let utf8 = self
            .conn
            .get_property(false, window, self.atoms.net_wm_name, self.atoms.utf8_string, 0, MAX_NAME_LEN)
            .map_err(x11_err)?
            .reply()
            .map_err(x11_err)?;
        if !utf8.value.is_empty() {
            return String::from_utf8(utf8.value)
                .map_err(|_| BarError::display("window name is not valid UTF-8"));
        }

        // ICCCM WM_NAME is Latin-1
        let legacy = self
            .conn
            .get_property(false, window, AtomEnum::WM_NAME, AtomEnum::STRING, 0, MAX_NAME_LEN)
            .map_err(x11_err)?
            .reply()
            .map_err(x11_err)?;
        if legacy.value.is_empty() {
            return Err(BarError::display("window has no name"));
        }
        Ok(legacy.value.iter().map(|&b| char::from(b)).collect())
    }

    /// Drain queued events; true if any changed the active window.
    fn drain_events(&self) -> Result<bool> {
        let mut changed = false;
        while let Some(event) = self.conn.poll_for_event().map_err(x11_err)? {
            if let Event::PropertyNotify(ev) = event {
                if ev.window == self.root && ev.atom == self.atoms.net_active_window {
                    changed = true;
                }
            }
        }
        Ok(changed)
    }

    /// Wait until the connection socket is readable or `timeout` passes.
    fn wait_readable(&self, timeout: Duration) -> Result<()> {
        let mut fds = libc::pollfd {
            fd: self.conn.stream().as_raw_fd(),
            events: libc::POLLIN,
            revents: 0,
        };
        let millis = timeout.as_millis().min(i32::MAX as u128) as libc::c_int;

        // SAFETY: `fds` is a single valid pollfd that outlives the call.
        let rc = unsafe { libc::poll(&mut fds, 1, millis) };
        if rc < 0 {
            let err = std::io::Error::last_os_error();
            if err.kind() != std::io::ErrorKind::Interrupted {
                return Err(err.into());
            }
        }
        if fds.revents & (libc::POLLERR | libc::POLLHUP | libc::POLLNVAL) != 0 {
            return Err(BarError::display("X server connection closed"));
        }
        Ok(())
    }
}

impl WindowSource for X11WindowSource {
    fn wait_for_change(&mut self, timeout: Duration) -> Result<bool> {
        // Replies read by earlier requests may have queued events already.
        if self.drain_events()? {
            return Ok(true);
        }
        self.wait_readable(timeout)?;
        self.drain_events()
    }

    fn active_title(&mut self) -> Result<String> {
        let window = self.active_window()?;
        self.window_name(window)
    }
}
