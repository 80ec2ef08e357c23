//! Location resolution
//!
//! Combines the device position, an IP lookup and reverse geocoding into a
//! single [`UserLocation`]. Every source swallows its own failure:
//!
//! 1. the device position and the IP lookup run concurrently;
//! 2. IP coordinates are reverse-geocoded, and those names win over the
//!    names reported by the IP service;
//! 3. device coordinates, when present, replace IP coordinates and are
//!    reverse-geocoded in turn, falling back to the names found so far.
//!
//! With no coordinates from either source the result is `None`. Each call
//! takes a new attempt number; an attempt overtaken by a newer call also
//! returns `None`.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use domain::value_objects::{GeoLocation, PlaceDetails, UserLocation};
use tracing::{debug, instrument, warn};

use crate::ports::{DevicePositionPort, IpLocation, IpLocationPort, ReverseGeocodePort};

/// Resolves the user's location through the fallback chain
pub struct LocationResolver {
    device: Arc<dyn DevicePositionPort>,
    ip: Arc<dyn IpLocationPort>,
    reverse: Arc<dyn ReverseGeocodePort>,
    attempt: AtomicU64,
}

impl fmt::Debug for LocationResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationResolver")
            .field("attempt", &self.attempt.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl LocationResolver {
    /// Create a resolver from its three sources
    pub fn new(
        device: Arc<dyn DevicePositionPort>,
        ip: Arc<dyn IpLocationPort>,
        reverse: Arc<dyn ReverseGeocodePort>,
    ) -> Self {
        Self {
            device,
            ip,
            reverse,
            attempt: AtomicU64::new(0),
        }
    }

    /// Run the fallback chain once
    ///
    /// Returns `None` when a newer `resolve` started before this one
    /// finished.
    #[instrument(skip(self))]
    pub async fn resolve(&self) -> Option<UserLocation> {
        let attempt = self.attempt.fetch_add(1, Ordering::SeqCst) + 1;
        let (device, ip) = tokio::join!(self.device_position(), self.ip_lookup());

        let mut resolved: Option<UserLocation> = None;

        if let Some(ip) = ip {
            let refined = self.reverse_lookup(&ip.position).await;
            resolved = Some(UserLocation::new(ip.position, refined.or(ip.place)));
        }

        if let Some(position) = device {
            let refined = self.reverse_lookup(&position).await;
            let previous = resolved.as_ref().map(UserLocation::place).unwrap_or_default();
            resolved = Some(UserLocation::new(position, refined.or(previous)));
        }

        if self.attempt.load(Ordering::SeqCst) != attempt {
            debug!(attempt, "Discarding superseded location attempt");
            return None;
        }

        match &resolved {
            Some(location) => debug!(location = %location.display_name(), "Resolved location"),
            None => debug!("No location source produced coordinates"),
        }
        resolved
    }

    async fn device_position(&self) -> Option<GeoLocation> {
        self.device
            .current_position()
            .await
            .inspect_err(|e| debug!(error = %e, "Device position unavailable"))
            .ok()
    }

    async fn ip_lookup(&self) -> Option<IpLocation> {
        match self.ip.lookup().await {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "IP location lookup failed");
                None
            },
        }
    }

    async fn reverse_lookup(&self, position: &GeoLocation) -> PlaceDetails {
        self.reverse
            .reverse_geocode(position)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Reverse geocoding failed");
                PlaceDetails::default()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApplicationError;
    use crate::ports::{MockDevicePositionPort, MockIpLocationPort, MockReverseGeocodePort};

    fn denied_device() -> MockDevicePositionPort {
        let mut mock = MockDevicePositionPort::new();
        mock.expect_current_position()
            .returning(|| Err(ApplicationError::ExternalService("permission denied".into())));
        mock
    }

    fn device_at(lat: f64, lon: f64) -> MockDevicePositionPort {
        let mut mock = MockDevicePositionPort::new();
        mock.expect_current_position()
            .returning(move || Ok(GeoLocation::new_unchecked(lat, lon)));
        mock
    }

    fn ip_paris() -> MockIpLocationPort {
        let mut mock = MockIpLocationPort::new();
        mock.expect_lookup().returning(|| {
            Ok(Some(IpLocation {
                position: GeoLocation::new_unchecked(48.85, 2.35),
                place: PlaceDetails::new(Some("Paris".into()), None, Some("France".into())),
            }))
        });
        mock
    }

    fn ip_failing() -> MockIpLocationPort {
        let mut mock = MockIpLocationPort::new();
        mock.expect_lookup()
            .returning(|| Err(ApplicationError::ExternalService("offline".into())));
        mock
    }

    fn reverse_empty() -> MockReverseGeocodePort {
        let mut mock = MockReverseGeocodePort::new();
        mock.expect_reverse_geocode()
            .returning(|_| Ok(PlaceDetails::default()));
        mock
    }

    fn resolver(
        device: MockDevicePositionPort,
        ip: MockIpLocationPort,
        reverse: MockReverseGeocodePort,
    ) -> LocationResolver {
        LocationResolver::new(Arc::new(device), Arc::new(ip), Arc::new(reverse))
    }

    #[tokio::test]
    async fn ip_names_survive_an_empty_reverse_geocode() {
        let location = resolver(denied_device(), ip_paris(), reverse_empty())
            .resolve()
            .await
            .expect("location");

        assert!((location.latitude - 48.85).abs() < f64::EPSILON);
        assert!((location.longitude - 2.35).abs() < f64::EPSILON);
        assert_eq!(location.city.as_deref(), Some("Paris"));
        assert_eq!(location.country.as_deref(), Some("France"));
        assert_eq!(location.region, None);
    }

    #[tokio::test]
    async fn reverse_geocode_names_win_over_ip_names() {
        let mut reverse = MockReverseGeocodePort::new();
        reverse.expect_reverse_geocode().returning(|_| {
            Ok(PlaceDetails::new(
                Some("Paris 4e".into()),
                Some("Île-de-France".into()),
                None,
            ))
        });

        let location = resolver(denied_device(), ip_paris(), reverse)
            .resolve()
            .await
            .expect("location");

        assert_eq!(location.city.as_deref(), Some("Paris 4e"));
        assert_eq!(location.region.as_deref(), Some("Île-de-France"));
        assert_eq!(location.country.as_deref(), Some("France"));
    }

    #[tokio::test]
    async fn device_coordinates_win_over_ip_coordinates() {
        let mut reverse = MockReverseGeocodePort::new();
        reverse.expect_reverse_geocode().returning(|pos| {
            if pos.latitude() > 50.0 {
                Ok(PlaceDetails::new(Some("Berlin".into()), None, Some("Germany".into())))
            } else {
                Ok(PlaceDetails::default())
            }
        });

        let location = resolver(device_at(52.52, 13.405), ip_paris(), reverse)
            .resolve()
            .await
            .expect("location");

        assert!((location.latitude - 52.52).abs() < f64::EPSILON);
        assert_eq!(location.display_name(), "Berlin, Germany");
    }

    #[tokio::test]
    async fn device_only_with_failed_reverse_geocode_keeps_coordinates() {
        let mut reverse = MockReverseGeocodePort::new();
        reverse
            .expect_reverse_geocode()
            .returning(|_| Err(ApplicationError::ExternalService("timeout".into())));

        let location = resolver(device_at(40.7128, -74.006), ip_failing(), reverse)
            .resolve()
            .await
            .expect("location");

        assert_eq!(location.place(), PlaceDetails::default());
        assert_eq!(location.display_name(), "40.7128, -74.0060");
    }

    #[tokio::test]
    async fn no_coordinates_means_no_location() {
        let mut reverse = MockReverseGeocodePort::new();
        reverse.expect_reverse_geocode().never();
        let mut ip = MockIpLocationPort::new();
        ip.expect_lookup().returning(|| Ok(None));

        assert!(resolver(denied_device(), ip, reverse).resolve().await.is_none());
    }

    struct SlowIp;

    #[async_trait::async_trait]
    impl IpLocationPort for SlowIp {
        async fn lookup(&self) -> Result<Option<IpLocation>, ApplicationError> {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            Ok(Some(IpLocation {
                position: GeoLocation::new_unchecked(48.85, 2.35),
                place: PlaceDetails::new(Some("Paris".into()), None, Some("France".into())),
            }))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_resolve_discards_the_older_attempt() {
        let resolver = LocationResolver::new(
            Arc::new(denied_device()),
            Arc::new(SlowIp),
            Arc::new(reverse_empty()),
        );

        let (first, second) = tokio::join!(resolver.resolve(), async {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            resolver.resolve().await
        });

        assert!(first.is_none());
        assert_eq!(second.expect("location").display_name(), "Paris, France");
    }

    #[tokio::test]
    async fn sequential_resolves_both_succeed() {
        let resolver = resolver(denied_device(), ip_paris(), reverse_empty());
        assert!(resolver.resolve().await.is_some());
        assert!(resolver.resolve().await.is_some());
    }

    #[tokio::test]
    async fn everything_failing_means_no_location() {
        assert!(
            resolver(denied_device(), ip_failing(), reverse_empty())
                .resolve()
                .await
                .is_none()
        );
    }
}
