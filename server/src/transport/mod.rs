mod channel;

cfg_if! {
    if #[cfg(feature = "transport_websocket")] {
        pub mod websocket;
    }
}
