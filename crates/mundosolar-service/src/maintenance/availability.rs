//! Technician availability derived from the day's maintenance schedule.
//!
//! Nothing is stored: availability is computed per request by scanning
//! the day's blocking assignments. A visit occupies its technician for
//! the maintenance duration plus a travel buffer, starting at the
//! scheduled hour.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mundosolar_auth::policy::{self, Action, Resource};
use mundosolar_core::error::AppError;
use mundosolar_database::repositories::maintenance::MaintenanceRepository;
use mundosolar_database::repositories::user::UserRepository;
use mundosolar_entity::user::UserRole;

use crate::context::StaffContext;

/// Hours of a visit itself.
pub const MAINTENANCE_DURATION_HOURS: i32 = 2;
/// Travel buffer between visits.
pub const TRAVEL_BUFFER_HOURS: i32 = 1;
/// Total hours a visit blocks its technician.
pub const TOTAL_BLOCKING_HOURS: i32 = MAINTENANCE_DURATION_HOURS + TRAVEL_BUFFER_HOURS;

/// First bookable hour of the working day.
pub const FIRST_HOUR: i32 = 7;
/// Last bookable hour of the working day (inclusive).
pub const LAST_HOUR: i32 = 18;

/// Availability of one hourly slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlySlot {
    /// Hour of day (7..=18).
    pub hour: i32,
    /// Whether at least one technician is free.
    pub is_available: bool,
    /// Whether every technician conflicts at this hour.
    pub all_busy: bool,
}

/// Whether a visit scheduled at `scheduled_hour` blocks `hour`.
fn blocks(scheduled_hour: i32, hour: i32) -> bool {
    scheduled_hour <= hour && hour < scheduled_hour + TOTAL_BLOCKING_HOURS
}

/// Compute the client-facing hourly availability for one day.
///
/// `assignments` holds `(technician_id, scheduled_hour)` for every
/// still-blocking visit that day; `technicians` is the active roster. A
/// slot is unavailable only when every technician conflicts.
pub fn compute_hourly_availability(
    technicians: &[Uuid],
    assignments: &[(Uuid, i32)],
) -> Vec<HourlySlot> {
    (FIRST_HOUR..=LAST_HOUR)
        .map(|hour| {
            let all_busy = !technicians.is_empty()
                && technicians.iter().all(|tech| {
                    assignments
                        .iter()
                        .any(|(t, h)| t == tech && blocks(*h, hour))
                });
            HourlySlot {
                hour,
                is_available: !all_busy,
                all_busy,
            }
        })
        .collect()
}

/// Compute one technician's free hours for a day (admin view).
pub fn compute_technician_hours(technician_id: Uuid, assignments: &[(Uuid, i32)]) -> Vec<HourlySlot> {
    (FIRST_HOUR..=LAST_HOUR)
        .map(|hour| {
            let busy = assignments
                .iter()
                .any(|(t, h)| *t == technician_id && blocks(*h, hour));
            HourlySlot {
                hour,
                is_available: !busy,
                all_busy: busy,
            }
        })
        .collect()
}

/// Serves availability queries over the roster and the day's schedule.
#[derive(Debug, Clone)]
pub struct AvailabilityService {
    maintenance_repo: Arc<MaintenanceRepository>,
    user_repo: Arc<UserRepository>,
}

impl AvailabilityService {
    /// Creates a new availability service.
    pub fn new(
        maintenance_repo: Arc<MaintenanceRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            maintenance_repo,
            user_repo,
        }
    }

    /// Client-facing hourly availability: a slot is free when at least one
    /// active technician is free.
    pub async fn hourly_availability(&self, date: NaiveDate) -> Result<Vec<HourlySlot>, AppError> {
        let technicians: Vec<Uuid> = self
            .user_repo
            .find_active_by_role(UserRole::Technician)
            .await?
            .into_iter()
            .map(|u| u.id)
            .collect();
        let assignments = self.maintenance_repo.blocking_assignments_on(date).await?;
        Ok(compute_hourly_availability(&technicians, &assignments))
    }

    /// Admin-facing availability of one specific technician.
    pub async fn technician_availability(
        &self,
        ctx: &StaffContext,
        technician_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<HourlySlot>, AppError> {
        policy::authorize(ctx.role, Resource::Maintenance, Action::Read)?;
        let assignments = self.maintenance_repo.blocking_assignments_on(date).await?;
        Ok(compute_technician_hours(technician_id, &assignments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_technician_blocked_three_hours() {
        let tech = Uuid::new_v4();
        let slots = compute_hourly_availability(&[tech], &[(tech, 9)]);

        for slot in &slots {
            let expect_busy = (9..12).contains(&slot.hour);
            assert_eq!(
                slot.all_busy, expect_busy,
                "hour {} busy mismatch",
                slot.hour
            );
            assert_eq!(slot.is_available, !expect_busy);
        }
        // Hour 12 is the first free hour after the 9:00 visit.
        assert!(slots.iter().find(|s| s.hour == 12).unwrap().is_available);
    }

    #[test]
    fn test_slot_free_when_one_of_two_technicians_is_free() {
        let busy_tech = Uuid::new_v4();
        let free_tech = Uuid::new_v4();
        let slots = compute_hourly_availability(&[busy_tech, free_tech], &[(busy_tech, 9)]);

        assert!(slots.iter().all(|s| s.is_available));
        assert!(slots.iter().all(|s| !s.all_busy));
    }

    #[test]
    fn test_empty_roster_reports_available() {
        // No technicians on file: nothing to conflict with; slots stay
        // nominally available rather than all-busy.
        let slots = compute_hourly_availability(&[], &[]);
        assert!(slots.iter().all(|s| s.is_available));
    }

    #[test]
    fn test_covers_working_hours_inclusive() {
        let slots = compute_hourly_availability(&[], &[]);
        assert_eq!(slots.len(), 12);
        assert_eq!(slots.first().unwrap().hour, 7);
        assert_eq!(slots.last().unwrap().hour, 18);
    }

    #[test]
    fn test_technician_view_tracks_only_that_technician() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let slots = compute_technician_hours(a, &[(b, 9), (a, 14)]);

        assert!(slots.iter().find(|s| s.hour == 9).unwrap().is_available);
        for hour in 14..17 {
            assert!(!slots.iter().find(|s| s.hour == hour).unwrap().is_available);
        }
        assert!(slots.iter().find(|s| s.hour == 17).unwrap().is_available);
    }

    #[test]
    fn test_back_to_back_visits() {
        let tech = Uuid::new_v4();
        // Visits at 7 and 10 block 7..13 contiguously.
        let slots = compute_hourly_availability(&[tech], &[(tech, 7), (tech, 10)]);
        for slot in &slots {
            let expect_busy = (7..13).contains(&slot.hour);
            assert_eq!(slot.all_busy, expect_busy, "hour {}", slot.hour);
        }
    }
}
