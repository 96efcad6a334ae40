use std::collections::HashMap;
use std::ffi::{c_char, c_int, CStr, CString};
use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};

use once_cell::sync::Lazy;
use parking_lot::{const_mutex, Mutex};
use sdl_abi::{JoystickGUID, Surface};

use super::error::set_error;
use super::surface::surface;
use super::video::window;
use super::{adopt, is_live, lookup, reclaim};
use crate::{
    SDL_bool, SDL_Cursor, SDL_GameController, SDL_Joystick, SDL_Window, SDL_DISABLE, SDL_ENABLE,
    SDL_FALSE, SDL_NUM_SCANCODES, SDL_NUM_SYSTEM_CURSORS, SDL_QUERY, SDL_TRUE,
};

const CURSOR: &str = "cursor";
const JOYSTICK: &str = "joystick";
const GAME_CONTROLLER: &str = "game_controller";

// Mouse and cursor

struct StubCursor {
    _system: Option<c_int>,
}

struct MouseState {
    focus: usize,
    x: c_int,
    y: c_int,
    buttons: u32,
    shown: bool,
    relative: bool,
}

static MOUSE: Mutex<MouseState> = const_mutex(MouseState {
    focus: 0,
    x: 0,
    y: 0,
    buttons: 0,
    shown: true,
    relative: false,
});
static CURRENT_CURSOR: AtomicUsize = AtomicUsize::new(0);

fn cursor(cursor: *mut SDL_Cursor) -> Option<&'static mut StubCursor> {
    // SAFETY: the registry only resolves live cursors.
    unsafe { lookup::<StubCursor, _>(cursor, CURSOR) }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_CreateSystemCursor(id: c_int) -> *mut SDL_Cursor {
    if !(0..SDL_NUM_SYSTEM_CURSORS).contains(&id) {
        set_error("Invalid system cursor");
        return ptr::null_mut();
    }
    adopt(StubCursor { _system: Some(id) }, CURSOR).cast()
}

#[no_mangle]
pub unsafe extern "C" fn SDL_CreateColorCursor(
    surface: *mut Surface,
    hot_x: c_int,
    hot_y: c_int,
) -> *mut SDL_Cursor {
    let Some(record) = self::surface(surface) else {
        set_error("Passed NULL cursor surface");
        return ptr::null_mut();
    };
    if hot_x < 0 || hot_y < 0 || hot_x >= record.w || hot_y >= record.h {
        set_error("Cursor hot spot doesn't lie within cursor");
        return ptr::null_mut();
    }
    adopt(StubCursor { _system: None }, CURSOR).cast()
}

/// `data` and `mask` are 1-bit rows, so the width must be a whole number of bytes.
#[no_mangle]
pub unsafe extern "C" fn SDL_CreateCursor(
    data: *const u8,
    mask: *const u8,
    w: c_int,
    h: c_int,
    hot_x: c_int,
    hot_y: c_int,
) -> *mut SDL_Cursor {
    if data.is_null() || mask.is_null() {
        set_error("Parameter 'data' is invalid");
        return ptr::null_mut();
    }
    if hot_x < 0 || hot_y < 0 || hot_x >= w || hot_y >= h {
        set_error("Cursor hot spot doesn't lie within cursor");
        return ptr::null_mut();
    }
    adopt(StubCursor { _system: None }, CURSOR).cast()
}

/// The active cursor, null until one is set.
#[no_mangle]
pub unsafe extern "C" fn SDL_GetCursor() -> *mut SDL_Cursor {
    CURRENT_CURSOR.load(Ordering::Relaxed) as *mut SDL_Cursor
}

/// A null cursor only redraws the current one.
#[no_mangle]
pub unsafe extern "C" fn SDL_SetCursor(cursor: *mut SDL_Cursor) {
    if cursor.is_null() {
        return;
    }
    if self::cursor(cursor).is_some() {
        CURRENT_CURSOR.store(cursor as usize, Ordering::Relaxed);
    } else {
        set_error("Cursor not associated with the current mouse");
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_FreeCursor(cursor: *mut SDL_Cursor) {
    // SAFETY: the registry only reclaims live cursors.
    if unsafe { reclaim::<StubCursor, _>(cursor, CURSOR) }.is_some() {
        let _ = CURRENT_CURSOR.compare_exchange(
            cursor as usize,
            0,
            Ordering::Relaxed,
            Ordering::Relaxed,
        );
    }
}

unsafe fn write_position(x: *mut c_int, y: *mut c_int, position: (c_int, c_int)) {
    // SAFETY: caller-provided out parameters, each optional.
    unsafe {
        if !x.is_null() {
            x.write(position.0);
        }
        if !y.is_null() {
            y.write(position.1);
        }
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetMouseState(x: *mut c_int, y: *mut c_int) -> u32 {
    let mouse = MOUSE.lock();
    // SAFETY: forwarded out parameters.
    unsafe { write_position(x, y, (mouse.x, mouse.y)) };
    mouse.buttons
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetRelativeMouseState(x: *mut c_int, y: *mut c_int) -> u32 {
    let mouse = MOUSE.lock();
    // SAFETY: forwarded out parameters.
    unsafe { write_position(x, y, (0, 0)) };
    mouse.buttons
}

/// Returns the visibility after the call; `SDL_QUERY` leaves it unchanged.
#[no_mangle]
pub unsafe extern "C" fn SDL_ShowCursor(toggle: c_int) -> c_int {
    let mut mouse = MOUSE.lock();
    match toggle {
        SDL_QUERY => {}
        SDL_DISABLE => mouse.shown = false,
        _ => mouse.shown = true,
    }
    if mouse.shown {
        SDL_ENABLE
    } else {
        SDL_DISABLE
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_SetRelativeMouseMode(enabled: SDL_bool) -> c_int {
    MOUSE.lock().relative = enabled != SDL_FALSE;
    0
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetRelativeMouseMode() -> SDL_bool {
    if MOUSE.lock().relative {
        SDL_TRUE
    } else {
        SDL_FALSE
    }
}

/// The window the mouse was last warped into, while it is alive.
#[no_mangle]
pub unsafe extern "C" fn SDL_GetMouseFocus() -> *mut SDL_Window {
    let focus = MOUSE.lock().focus as *mut SDL_Window;
    if is_live(focus.cast()) {
        focus
    } else {
        ptr::null_mut()
    }
}

/// Moves the pointer and focuses `window`; null means the focused window.
#[no_mangle]
pub unsafe extern "C" fn SDL_WarpMouseInWindow(window: *mut SDL_Window, x: c_int, y: c_int) {
    // SAFETY: no arguments.
    let target = if window.is_null() { unsafe { SDL_GetMouseFocus() } } else { window };
    if target.is_null() || self::window(target).is_none() {
        return;
    }
    let mut mouse = MOUSE.lock();
    mouse.focus = target as usize;
    mouse.x = x;
    mouse.y = y;
}

// Keyboard

static KEYBOARD_STATE: [u8; SDL_NUM_SCANCODES as usize] = [0; SDL_NUM_SCANCODES as usize];
static TEXT_INPUT: AtomicBool = AtomicBool::new(false);
static MOD_STATE: AtomicI32 = AtomicI32::new(0);

const SCANCODE_MASK: i32 = 1 << 30;

/// Scancode, keycode and name for the keys the stub knows.
static KEYS: Lazy<Vec<(c_int, i32, CString)>> = Lazy::new(|| {
    let mut keys = Vec::new();
    for (offset, letter) in (b'A'..=b'Z').enumerate() {
        keys.push((4 + offset as c_int, i32::from(letter.to_ascii_lowercase()), letter));
    }
    for (offset, digit) in (b'1'..=b'9').chain([b'0']).enumerate() {
        keys.push((30 + offset as c_int, i32::from(digit), digit));
    }
    let mut keys: Vec<_> = keys
        .into_iter()
        .filter_map(|(scancode, sym, name)| {
            CString::new(vec![name]).ok().map(|name| (scancode, sym, name))
        })
        .collect();
    let named: [(c_int, i32, &CStr); 9] = [
        (40, 13, c"Return"),
        (41, 27, c"Escape"),
        (42, 8, c"Backspace"),
        (43, 9, c"Tab"),
        (44, 32, c"Space"),
        (79, 79 | SCANCODE_MASK, c"Right"),
        (80, 80 | SCANCODE_MASK, c"Left"),
        (81, 81 | SCANCODE_MASK, c"Down"),
        (82, 82 | SCANCODE_MASK, c"Up"),
    ];
    keys.extend(
        named
            .into_iter()
            .map(|(scancode, sym, name)| (scancode, sym, name.to_owned())),
    );
    keys
});

#[no_mangle]
pub unsafe extern "C" fn SDL_GetKeyboardState(numkeys: *mut c_int) -> *const u8 {
    if !numkeys.is_null() {
        // SAFETY: caller-provided out parameter.
        unsafe { numkeys.write(SDL_NUM_SCANCODES) };
    }
    KEYBOARD_STATE.as_ptr()
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetModState() -> c_int {
    MOD_STATE.load(Ordering::Relaxed)
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetScancodeName(scancode: c_int) -> *const c_char {
    if !(0..SDL_NUM_SCANCODES).contains(&scancode) {
        set_error("Parameter 'scancode' is invalid");
        return c"".as_ptr();
    }
    KEYS.iter()
        .find(|(code, _, _)| *code == scancode)
        .map_or(c"".as_ptr(), |(_, _, name)| name.as_ptr())
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetKeyName(key: i32) -> *const c_char {
    KEYS.iter()
        .find(|(_, sym, _)| *sym == key)
        .map_or(c"".as_ptr(), |(_, _, name)| name.as_ptr())
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetKeyFromName(name: *const c_char) -> i32 {
    if name.is_null() {
        return 0;
    }
    // SAFETY: caller passes a NUL-terminated string.
    let name = unsafe { CStr::from_ptr(name) }.to_bytes();
    KEYS.iter()
        .find(|(_, _, known)| known.to_bytes().eq_ignore_ascii_case(name))
        .map_or(0, |(_, sym, _)| *sym)
}

#[no_mangle]
pub unsafe extern "C" fn SDL_StartTextInput() {
    TEXT_INPUT.store(true, Ordering::Relaxed);
}

#[no_mangle]
pub unsafe extern "C" fn SDL_StopTextInput() {
    TEXT_INPUT.store(false, Ordering::Relaxed);
}

#[no_mangle]
pub unsafe extern "C" fn SDL_IsTextInputActive() -> SDL_bool {
    if TEXT_INPUT.load(Ordering::Relaxed) {
        SDL_TRUE
    } else {
        SDL_FALSE
    }
}

// Joystick

struct Device {
    name: CString,
    guid: JoystickGUID,
    axes: Vec<i16>,
    buttons: Vec<u8>,
    hats: Vec<u8>,
    balls: usize,
}

struct Joysticks {
    devices: Vec<Device>,
    mappings: HashMap<JoystickGUID, String>,
    next_instance: i32,
}

static JOYSTICKS: Lazy<Mutex<Joysticks>> = Lazy::new(|| {
    Mutex::new(Joysticks {
        devices: Vec::new(),
        mappings: HashMap::new(),
        next_instance: 0,
    })
});

struct StubJoystick {
    device: usize,
    instance: i32,
}

struct StubController {
    joystick: *mut SDL_Joystick,
    name: CString,
}

fn guid_for(name: &str) -> JoystickGUID {
    let mut guid = JoystickGUID::default();
    for (slot, byte) in guid.data.iter_mut().zip(name.bytes()) {
        *slot = byte;
    }
    guid
}

fn guid_string(guid: &JoystickGUID) -> String {
    guid.data.iter().map(|byte| format!("{byte:02x}")).collect()
}

fn parse_guid(text: &str) -> Option<JoystickGUID> {
    if text.len() != 32 || !text.is_ascii() {
        return None;
    }
    let mut guid = JoystickGUID::default();
    for (index, slot) in guid.data.iter_mut().enumerate() {
        *slot = u8::from_str_radix(&text[index * 2..index * 2 + 2], 16).ok()?;
    }
    Some(guid)
}

/// Adds a virtual device and returns its device index.
pub(crate) fn attach_device(name: &str, axes: usize, buttons: usize, hats: usize) -> c_int {
    let mut joysticks = JOYSTICKS.lock();
    joysticks.devices.push(Device {
        name: CString::new(name.replace('\0', "")).unwrap_or_default(),
        guid: guid_for(name),
        axes: vec![0; axes],
        buttons: vec![0; buttons],
        hats: vec![0; hats],
        balls: 0,
    });
    (joysticks.devices.len() - 1) as c_int
}

pub(crate) fn update_device(
    device_index: c_int,
    update: impl FnOnce(&mut [i16], &mut [u8], &mut [u8]),
) {
    let mut joysticks = JOYSTICKS.lock();
    if let Some(device) = usize::try_from(device_index)
        .ok()
        .and_then(|index| joysticks.devices.get_mut(index))
    {
        update(
            device.axes.as_mut_slice(),
            device.buttons.as_mut_slice(),
            device.hats.as_mut_slice(),
        );
    }
}

fn joystick(joystick: *mut SDL_Joystick) -> Option<&'static mut StubJoystick> {
    // SAFETY: the registry only resolves live joysticks.
    let found = unsafe { lookup::<StubJoystick, _>(joystick, JOYSTICK) };
    if found.is_none() {
        set_error("Joystick hasn't been opened yet");
    }
    found
}

fn with_device<R>(joystick: *mut SDL_Joystick, fallback: R, read: impl FnOnce(&Device) -> R) -> R {
    let Some(device) = self::joystick(joystick).map(|joystick| joystick.device) else {
        return fallback;
    };
    JOYSTICKS.lock().devices.get(device).map_or(fallback, read)
}

fn check_device_index(device_index: c_int) -> Option<usize> {
    let count = JOYSTICKS.lock().devices.len();
    match usize::try_from(device_index) {
        Ok(index) if index < count => Some(index),
        _ => {
            set_error(format!("There are {count} joysticks available"));
            None
        }
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_NumJoysticks() -> c_int {
    JOYSTICKS.lock().devices.len() as c_int
}

#[no_mangle]
pub unsafe extern "C" fn SDL_JoystickNameForIndex(device_index: c_int) -> *const c_char {
    let Some(index) = check_device_index(device_index) else {
        return ptr::null();
    };
    JOYSTICKS
        .lock()
        .devices
        .get(index)
        .map_or(ptr::null(), |device| device.name.as_ptr())
}

#[no_mangle]
pub unsafe extern "C" fn SDL_JoystickOpen(device_index: c_int) -> *mut SDL_Joystick {
    let Some(device) = check_device_index(device_index) else {
        return ptr::null_mut();
    };
    let instance = {
        let mut joysticks = JOYSTICKS.lock();
        let instance = joysticks.next_instance;
        joysticks.next_instance += 1;
        instance
    };
    adopt(StubJoystick { device, instance }, JOYSTICK).cast()
}

#[no_mangle]
pub unsafe extern "C" fn SDL_JoystickClose(joystick: *mut SDL_Joystick) {
    // SAFETY: the registry only reclaims live joysticks.
    if unsafe { reclaim::<StubJoystick, _>(joystick, JOYSTICK) }.is_none() {
        set_error("Joystick hasn't been opened yet");
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_JoystickName(joystick: *mut SDL_Joystick) -> *const c_char {
    with_device(joystick, ptr::null(), |device| device.name.as_ptr())
}

#[no_mangle]
pub unsafe extern "C" fn SDL_JoystickInstanceID(joystick: *mut SDL_Joystick) -> i32 {
    self::joystick(joystick).map_or(-1, |joystick| joystick.instance)
}

#[no_mangle]
pub unsafe extern "C" fn SDL_JoystickNumAxes(joystick: *mut SDL_Joystick) -> c_int {
    with_device(joystick, -1, |device| device.axes.len() as c_int)
}

#[no_mangle]
pub unsafe extern "C" fn SDL_JoystickNumBalls(joystick: *mut SDL_Joystick) -> c_int {
    with_device(joystick, -1, |device| device.balls as c_int)
}

#[no_mangle]
pub unsafe extern "C" fn SDL_JoystickNumHats(joystick: *mut SDL_Joystick) -> c_int {
    with_device(joystick, -1, |device| device.hats.len() as c_int)
}

#[no_mangle]
pub unsafe extern "C" fn SDL_JoystickNumButtons(joystick: *mut SDL_Joystick) -> c_int {
    with_device(joystick, -1, |device| device.buttons.len() as c_int)
}

#[no_mangle]
pub unsafe extern "C" fn SDL_JoystickGetAxis(joystick: *mut SDL_Joystick, axis: c_int) -> i16 {
    with_device(joystick, 0, |device| {
        match usize::try_from(axis).ok().and_then(|axis| device.axes.get(axis)) {
            Some(value) => *value,
            None => {
                set_error(format!("Joystick only has {} axes", device.axes.len()));
                0
            }
        }
    })
}

#[no_mangle]
pub unsafe extern "C" fn SDL_JoystickGetHat(joystick: *mut SDL_Joystick, hat: c_int) -> u8 {
    with_device(joystick, 0, |device| {
        match usize::try_from(hat).ok().and_then(|hat| device.hats.get(hat)) {
            Some(value) => *value,
            None => {
                set_error(format!("Joystick only has {} hats", device.hats.len()));
                0
            }
        }
    })
}

#[no_mangle]
pub unsafe extern "C" fn SDL_JoystickGetButton(joystick: *mut SDL_Joystick, button: c_int) -> u8 {
    with_device(joystick, 0, |device| {
        match usize::try_from(button).ok().and_then(|button| device.buttons.get(button)) {
            Some(value) => *value,
            None => {
                set_error(format!("Joystick only has {} buttons", device.buttons.len()));
                0
            }
        }
    })
}

#[no_mangle]
pub unsafe extern "C" fn SDL_JoystickGetGUID(joystick: *mut SDL_Joystick) -> JoystickGUID {
    with_device(joystick, JoystickGUID::default(), |device| device.guid)
}

/// Writes at most `cb_guid - 1` hex digits plus a NUL.
#[no_mangle]
pub unsafe extern "C" fn SDL_JoystickGetGUIDString(
    guid: JoystickGUID,
    psz_guid: *mut c_char,
    cb_guid: c_int,
) {
    if psz_guid.is_null() || cb_guid <= 0 {
        return;
    }
    let text = guid_string(&guid);
    let len = text.len().min(cb_guid as usize - 1);
    // SAFETY: caller passes `cb_guid` writable bytes.
    unsafe {
        ptr::copy_nonoverlapping(text.as_ptr().cast::<c_char>(), psz_guid, len);
        psz_guid.add(len).write(0);
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_JoystickUpdate() {}

// Game controller

#[no_mangle]
pub unsafe extern "C" fn SDL_IsGameController(joystick_index: c_int) -> SDL_bool {
    let joysticks = JOYSTICKS.lock();
    let mapped = usize::try_from(joystick_index)
        .ok()
        .and_then(|index| joysticks.devices.get(index))
        .is_some_and(|device| joysticks.mappings.contains_key(&device.guid));
    if mapped {
        SDL_TRUE
    } else {
        SDL_FALSE
    }
}

/// 1 for a new mapping, 0 for an updated one, -1 on error.
#[no_mangle]
pub unsafe extern "C" fn SDL_GameControllerAddMapping(mapping: *const c_char) -> c_int {
    if mapping.is_null() {
        return set_error("Parameter 'mapping' is invalid");
    }
    // SAFETY: caller passes a NUL-terminated string.
    let mapping = unsafe { CStr::from_ptr(mapping) }.to_string_lossy();
    let mut fields = mapping.splitn(3, ',');
    let (Some(guid), Some(name)) = (fields.next().and_then(parse_guid), fields.next()) else {
        return set_error("Invalid mapping string");
    };
    if name.is_empty() {
        return set_error("Invalid mapping string");
    }
    match JOYSTICKS.lock().mappings.insert(guid, name.to_owned()) {
        Some(_) => 0,
        None => 1,
    }
}

fn controller(controller: *mut SDL_GameController) -> Option<&'static mut StubController> {
    // SAFETY: the registry only resolves live controllers.
    let found = unsafe { lookup::<StubController, _>(controller, GAME_CONTROLLER) };
    if found.is_none() {
        set_error("Parameter 'gamecontroller' is invalid");
    }
    found
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GameControllerOpen(joystick_index: c_int) -> *mut SDL_GameController {
    let Some(index) = check_device_index(joystick_index) else {
        return ptr::null_mut();
    };
    let name = {
        let joysticks = JOYSTICKS.lock();
        joysticks
            .devices
            .get(index)
            .and_then(|device| joysticks.mappings.get(&device.guid))
            .cloned()
    };
    let Some(name) = name else {
        set_error(format!("The joystick at index {joystick_index} is not a game controller"));
        return ptr::null_mut();
    };
    // SAFETY: index validated above.
    let joystick = unsafe { SDL_JoystickOpen(joystick_index) };
    if joystick.is_null() {
        return ptr::null_mut();
    }
    let controller = StubController {
        joystick,
        name: CString::new(name).unwrap_or_default(),
    };
    adopt(controller, GAME_CONTROLLER).cast()
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GameControllerClose(controller: *mut SDL_GameController) {
    // SAFETY: the registry only reclaims live controllers; the inner joystick
    // is owned by the controller.
    unsafe {
        if let Some(controller) = reclaim::<StubController, _>(controller, GAME_CONTROLLER) {
            SDL_JoystickClose(controller.joystick);
        }
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GameControllerName(controller: *mut SDL_GameController) -> *const c_char {
    self::controller(controller).map_or(ptr::null(), |controller| controller.name.as_ptr())
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GameControllerGetAttached(controller: *mut SDL_GameController) -> SDL_bool {
    if self::controller(controller).is_some() {
        SDL_TRUE
    } else {
        SDL_FALSE
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GameControllerGetAxis(controller: *mut SDL_GameController, axis: c_int) -> i16 {
    match self::controller(controller) {
        // SAFETY: the controller keeps its joystick open.
        Some(controller) => unsafe { SDL_JoystickGetAxis(controller.joystick, axis) },
        None => 0,
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GameControllerGetButton(
    controller: *mut SDL_GameController,
    button: c_int,
) -> u8 {
    match self::controller(controller) {
        // SAFETY: the controller keeps its joystick open.
        Some(controller) => unsafe { SDL_JoystickGetButton(controller.joystick, button) },
        None => 0,
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GameControllerGetJoystick(
    controller: *mut SDL_GameController,
) -> *mut SDL_Joystick {
    self::controller(controller).map_or(ptr::null_mut(), |controller| controller.joystick)
}
