use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::clock::Clock;
use crate::error::{AppError, AppResult};
use crate::models::day_record::{DayRecord, MealEntry, WorkoutLogged};
use crate::models::profile::{BodyMetrics, ProfileView, UserId, UserProfile};
use crate::models::report::{DayTotals, Logged, ProgressReport};
use crate::models::workout::WorkoutType;
use crate::services::weather::TemperatureProvider;

/// A live temperature this far from the stored one triggers a recalculation
pub const TEMPERATURE_CHANGE_THRESHOLD_C: f64 = 5.0;

/// In-memory profiles, one lock per user.
///
/// The map itself is sharded so unrelated users never wait on each other.
/// Weather lookups are always made with the profile lock released.
/// Nothing here survives a restart.
#[derive(Clone)]
pub struct ProfileRegistry {
    profiles: Arc<DashMap<UserId, Arc<Mutex<UserProfile>>>>,
    weather: Arc<dyn TemperatureProvider>,
    clock: Arc<dyn Clock>,
}

impl ProfileRegistry {
    pub fn new(weather: Arc<dyn TemperatureProvider>, clock: Arc<dyn Clock>) -> Self {
        Self {
            profiles: Arc::new(DashMap::new()),
            weather,
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn contains(&self, user_id: UserId) -> bool {
        self.profiles.contains_key(&user_id)
    }

    fn handle(&self, user_id: UserId) -> AppResult<Arc<Mutex<UserProfile>>> {
        // Clone the Arc so the shard guard is dropped before anyone awaits the lock
        self.profiles
            .get(&user_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                AppError::NotFound("Profile not found, complete your profile first".into())
            })
    }

    /// Locks the profile currently registered for `user_id`.
    ///
    /// `register` may swap the profile while a caller waits for the lock; the
    /// guard is only returned once it belongs to the registered profile, so
    /// writes never land on a replaced one.
    async fn lock_current(&self, user_id: UserId) -> AppResult<OwnedMutexGuard<UserProfile>> {
        loop {
            let handle = self.handle(user_id)?;
            let guard = Arc::clone(&handle).lock_owned().await;
            let current = self
                .profiles
                .get(&user_id)
                .is_some_and(|entry| Arc::ptr_eq(entry.value(), &handle));
            if current {
                return Ok(guard);
            }
            tracing::debug!(user_id, "Profile replaced while waiting, retrying");
        }
    }

    /// Creates or replaces the profile of `user_id` and seeds today's record.
    ///
    /// The city must resolve to a temperature; otherwise nothing is stored.
    /// A replaced profile loses its history.
    pub async fn register(
        &self,
        user_id: UserId,
        metrics: BodyMetrics,
    ) -> AppResult<(ProfileView, DayRecord)> {
        let temperature = self
            .weather
            .current_temperature(&metrics.city)
            .await
            .ok_or_else(|| {
                AppError::ProviderUnavailable(format!(
                    "Could not get the temperature for '{}'. Check the city name and try again",
                    metrics.city
                ))
            })?;

        let mut profile = UserProfile::new(user_id, metrics);
        let today = profile
            .get_or_create_today(self.clock.today(), |_| Some(temperature))
            .clone();
        let view = ProfileView::from(&profile);

        let replaced = self
            .profiles
            .insert(user_id, Arc::new(Mutex::new(profile)))
            .is_some();

        tracing::info!(user_id, replaced, temperature, "Profile set up");
        Ok((view, today))
    }

    pub async fn profile(&self, user_id: UserId) -> AppResult<ProfileView> {
        let profile = self.lock_current(user_id).await?;
        Ok(ProfileView::from(&*profile))
    }

    /// Runs `f` on today's record under the profile lock.
    ///
    /// A missing record is created first; its temperature is fetched between
    /// two lock acquisitions. If a concurrent request created the record in
    /// the meantime, that record is used and the fetched value is dropped.
    async fn with_today<T, F>(&self, user_id: UserId, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut DayRecord) -> AppResult<T>,
    {
        let today = self.clock.today();

        let city = {
            let mut profile = self.lock_current(user_id).await?;
            if let Some(record) = profile.day_mut(today) {
                return f(record);
            }
            profile.metrics.city.clone()
        };

        let temperature = self.weather.current_temperature(&city).await;

        let mut profile = self.lock_current(user_id).await?;
        tracing::debug!(user_id, date = %today, "Opening new day");
        let record = profile.get_or_create_today(today, |_| temperature);
        f(record)
    }

    pub async fn get_or_create_today(&self, user_id: UserId) -> AppResult<DayRecord> {
        self.with_today(user_id, |record| Ok(record.clone())).await
    }

    pub async fn log_water(&self, user_id: UserId, amount_ml: f64) -> AppResult<DayTotals> {
        let totals = self
            .with_today(user_id, |record| {
                record.log_water(amount_ml)?;
                Ok(DayTotals::from(&*record))
            })
            .await?;

        tracing::info!(user_id, amount_ml, "Water logged");
        Ok(totals)
    }

    pub async fn log_meal(
        &self,
        user_id: UserId,
        name: &str,
        weight_grams: f64,
        calories_per_100g: f64,
    ) -> AppResult<Logged<MealEntry>> {
        let at = self.clock.now();
        let logged = self
            .with_today(user_id, |record| {
                let entry = record.log_meal(name, weight_grams, calories_per_100g, at)?;
                Ok(Logged {
                    entry,
                    totals: DayTotals::from(&*record),
                })
            })
            .await?;

        tracing::info!(
            user_id,
            meal = %logged.entry.name,
            calories = logged.entry.calories,
            "Meal logged"
        );
        Ok(logged)
    }

    /// The workout type is checked before the profile is touched.
    pub async fn log_workout(
        &self,
        user_id: UserId,
        workout_type: &str,
        duration_minutes: u32,
    ) -> AppResult<Logged<WorkoutLogged>> {
        let workout_type: WorkoutType = workout_type.parse()?;
        let at = self.clock.now();
        let logged = self
            .with_today(user_id, |record| {
                let entry = record.log_workout(workout_type, duration_minutes, at)?;
                Ok(Logged {
                    entry,
                    totals: DayTotals::from(&*record),
                })
            })
            .await?;

        tracing::info!(
            user_id,
            workout = %workout_type,
            duration_minutes,
            calories_burned = logged.entry.entry.calories_burned,
            "Workout logged"
        );
        Ok(logged)
    }

    /// Fails with `NotFound` when today's record has not been opened yet.
    pub async fn recalculate_targets(
        &self,
        user_id: UserId,
        temperature_c: f64,
    ) -> AppResult<DayRecord> {
        if !temperature_c.is_finite() {
            return Err(AppError::Validation("Temperature must be a finite number".into()));
        }
        let today = self.clock.today();
        let mut profile = self.lock_current(user_id).await?;
        let record = profile.recalculate_targets(today, temperature_c)?.clone();

        tracing::info!(user_id, temperature_c, "Targets recalculated");
        Ok(record)
    }

    /// Today's totals, refreshed against the live temperature.
    ///
    /// Goals are recomputed only when the live reading differs from the one
    /// they were based on by more than [`TEMPERATURE_CHANGE_THRESHOLD_C`].
    pub async fn progress(&self, user_id: UserId) -> AppResult<ProgressReport> {
        let city = self.lock_current(user_id).await?.metrics.city.clone();

        let live = self.weather.current_temperature(&city).await;

        let today = self.clock.today();
        let mut profile = self.lock_current(user_id).await?;
        let stored = profile.get_or_create_today(today, |_| live).temperature_c;

        let targets_recalculated = match live {
            Some(t) if (t - stored).abs() > TEMPERATURE_CHANGE_THRESHOLD_C => {
                profile.recalculate_targets(today, t)?;
                tracing::info!(user_id, previous = stored, current = t, "Temperature shifted, targets recalculated");
                true
            }
            _ => false,
        };

        let record = profile
            .day(today)
            .ok_or_else(|| AppError::NotFound(format!("No day record for {today}")))?;

        Ok(ProgressReport {
            totals: DayTotals::from(record),
            live_temperature_c: live,
            targets_recalculated,
        })
    }

    pub async fn summarize_range(&self, user_id: UserId, days_back: u32) -> AppResult<Vec<DayRecord>> {
        let today = self.clock.today();
        let profile = self.lock_current(user_id).await?;
        let records = profile
            .summarize_range(today, days_back)?
            .into_iter()
            .cloned()
            .collect();
        Ok(records)
    }
}
