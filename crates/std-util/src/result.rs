/// Unwraps the `Err` side of a result, panicking with the `Ok` value
/// otherwise.
#[macro_export]
macro_rules! assert_err {
    ($e:expr $(, $($t:tt)* )?) => {
        match $e {
            Err(e) => e,
            Ok(value) => {
                #[allow(unused_mut)]
                let mut msg = format!("expected `Err`; got Ok({:?})", value);
                $(
                    msg.push_str(", ");
                    msg.push_str(&format!($($t)*));
                )?
                panic!("{}", msg);
            }
        }
    };
}

/// Asserts the expression fails and that its error renders to exactly the
/// given message.
#[macro_export]
macro_rules! assert_err_msg {
    ($e:expr, $msg:expr) => {{
        let err = $crate::assert_err!($e);
        assert_eq!(err.to_string(), $msg);
        err
    }};
}

#[macro_export]
macro_rules! assert_ok {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            Err(err) => panic!("expected `Ok`; got Err({})", err),
        }
    };
}
