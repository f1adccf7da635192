use core::time::Duration;
use embedded_hal_async::delay::DelayNs;

/// Sleep for `duration` on any async delay provider.
///
/// Millisecond resolution, which is all the panel's periods need. Anything
/// longer than `u32::MAX` ms is clamped.
pub async fn pause<D: DelayNs>(delay: &mut D, duration: Duration) {
    let ms = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    delay.delay_ms(ms).await;
}
