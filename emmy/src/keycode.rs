/// KeyCode is the internal representation of all keycodes used by the keymap.
///
/// Basic keys use their USB HID usage id, so they can be forwarded to the host as-is.
/// Everything above `0xFF` is a firmware level keycode, which is consumed by the
/// firmware framework or by this crate and never reaches the host directly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum KeyCode {
    /// Reserved, no-key.
    No = 0x0000,
    A = 0x0004,
    B = 0x0005,
    C = 0x0006,
    D = 0x0007,
    E = 0x0008,
    F = 0x0009,
    G = 0x000A,
    H = 0x000B,
    I = 0x000C,
    J = 0x000D,
    K = 0x000E,
    L = 0x000F,
    M = 0x0010,
    N = 0x0011,
    O = 0x0012,
    P = 0x0013,
    Q = 0x0014,
    R = 0x0015,
    S = 0x0016,
    T = 0x0017,
    U = 0x0018,
    V = 0x0019,
    W = 0x001A,
    X = 0x001B,
    Y = 0x001C,
    Z = 0x001D,
    Kc1 = 0x001E,
    Kc2 = 0x001F,
    Kc3 = 0x0020,
    Kc4 = 0x0021,
    Kc5 = 0x0022,
    Kc6 = 0x0023,
    Kc7 = 0x0024,
    Kc8 = 0x0025,
    Kc9 = 0x0026,
    Kc0 = 0x0027,
    Enter = 0x0028,
    Escape = 0x0029,
    Backspace = 0x002A,
    Tab = 0x002B,
    Space = 0x002C,
    Minus = 0x002D,
    Equal = 0x002E,
    LeftBracket = 0x002F,
    RightBracket = 0x0030,
    Backslash = 0x0031,
    Semicolon = 0x0033,
    Quote = 0x0034,
    Grave = 0x0035,
    Comma = 0x0036,
    Dot = 0x0037,
    Slash = 0x0038,
    CapsLock = 0x0039,
    F1 = 0x003A,
    F2 = 0x003B,
    F3 = 0x003C,
    F4 = 0x003D,
    F5 = 0x003E,
    F6 = 0x003F,
    F7 = 0x0040,
    F8 = 0x0041,
    F9 = 0x0042,
    F10 = 0x0043,
    F11 = 0x0044,
    F12 = 0x0045,
    Home = 0x004A,
    PageUp = 0x004B,
    Delete = 0x004C,
    End = 0x004D,
    PageDown = 0x004E,
    Right = 0x004F,
    Left = 0x0050,
    Down = 0x0051,
    Up = 0x0052,
    LCtrl = 0x00E0,
    LShift = 0x00E1,
    LAlt = 0x00E2,
    LGui = 0x00E3,
    RCtrl = 0x00E4,
    RShift = 0x00E5,
    RAlt = 0x00E6,
    RGui = 0x00E7,
    // Consumer page keys
    AudioMute = 0x00A8,
    AudioVolUp = 0x00A9,
    AudioVolDown = 0x00AA,
    MediaNextTrack = 0x00AB,
    MediaPrevTrack = 0x00AC,
    MediaPlayPause = 0x00AE,
    BrightnessUp = 0x00BD,
    BrightnessDown = 0x00BE,
    MagicToggleNkro = 0x0113,
    // Backlight and RGB keycodes, uses 0x600 ~ 0x6FF
    RgbTog = 0x0620,
    RgbModeForward = 0x0621,
    RgbModeReverse = 0x0622,
    RgbHui = 0x0623,
    RgbHud = 0x0624,
    RgbSai = 0x0625,
    RgbSad = 0x0626,
    RgbVai = 0x0627,
    RgbVad = 0x0628,
    RgbSpi = 0x0629,
    RgbSpd = 0x062A,
    // Internal functional keycodes, use 0x700 ~ 0x7FF
    Bootloader = 0x0700,
    DebugToggle = 0x0702,
    ClearEeprom = 0x0703,
    // Keyboard vendor keycodes, use 0x800 ~ 0x81F
    TaskView = 0x0800,
    FileExplorer = 0x0801,
    BtHost1 = 0x0802,
    BtHost2 = 0x0803,
    BtHost3 = 0x0804,
    BatteryLevel = 0x0805,
    // User keycodes, use 0x840 ~ 0x85F
    /// Rainbow wave lighting
    LightingPreset1 = 0x0840,
    /// Static gold lighting
    LightingPreset2 = 0x0841,
    /// Static red lighting
    LightingPreset3 = 0x0842,
    /// Toggle the RGB matrix
    LightingToggle = 0x0843,
}

impl KeyCode {
    /// Returns `true` if the keycode is basic keycode.
    ///
    /// Consumer keys share the keyboard page range, they are excluded here.
    pub fn is_basic(self) -> bool {
        KeyCode::No <= self && self <= KeyCode::RGui && !self.is_consumer()
    }

    /// Returns `true` if the keycode is a modifier keycode
    pub fn is_modifier(self) -> bool {
        KeyCode::LCtrl <= self && self <= KeyCode::RGui
    }

    /// Returns `true` if the keycode is a keycode in consumer page
    pub fn is_consumer(self) -> bool {
        KeyCode::AudioMute <= self && self <= KeyCode::BrightnessDown
    }

    /// Returns `true` if the keycode is a rgb keycode
    pub fn is_rgb(self) -> bool {
        KeyCode::RgbTog <= self && self <= KeyCode::RgbSpd
    }

    /// Returns `true` if the keycode is handled by the firmware itself, such as goto bootloader
    pub fn is_internal(self) -> bool {
        KeyCode::Bootloader <= self && self <= KeyCode::ClearEeprom
    }

    /// Returns `true` if the keycode is a keyboard vendor keycode
    pub fn is_kb(self) -> bool {
        KeyCode::TaskView <= self && self <= KeyCode::BatteryLevel
    }

    /// Returns `true` if the keycode is a user keycode
    pub fn is_user(self) -> bool {
        KeyCode::LightingPreset1 <= self && self <= KeyCode::LightingToggle
    }
}
