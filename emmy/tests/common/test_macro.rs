/// Run a key sequence on a keyboard and check the keys sent to the host.
///
/// Every step is `[row, col, pressed, delay]`, `delay` is the time in milliseconds since the
/// previous step. Expected keys are `[KeyCode, pressed]` pairs in the order they are sent.
#[macro_export]
macro_rules! key_sequence_test {
    (keyboard: $keyboard:expr, sequence: [$([$row:expr, $col:expr, $pressed:expr, $delay:expr]),* $(,)?], expected_keys: [$([$key:ident, $key_pressed:expr]),* $(,)?]) => {
        {
            let mut keyboard = $keyboard;
            let mut device = $crate::common::create_test_device();
            let sequence: Vec<$crate::common::TestKeyPress> = vec![
                $(
                    $crate::common::TestKeyPress {
                        row: $row,
                        col: $col,
                        pressed: $pressed,
                        delay: $delay,
                    },
                )*
            ];
            let expected_keys: Vec<(emmy::keycode::KeyCode, bool)> = vec![
                $(
                    (emmy::keycode::KeyCode::$key, $key_pressed),
                )*
            ];

            $crate::common::run_key_sequence_test(&mut keyboard, &mut device, &sequence);
            assert_eq!(device.reporter.keys, expected_keys, "expected left but actually right");
            device
        }
    };
}

// a rust macro to create a key sequence to simulate key presses
#[macro_export]
macro_rules! key_sequence {
    ($([$row:expr, $col:expr, $pressed:expr, $delay:expr]),* $(,)?) => {
        vec![
            $(
                $crate::common::TestKeyPress {
                    row: $row,
                    col: $col,
                    pressed: $pressed,
                    delay: $delay,
                },
            )*
        ]
    };
}
