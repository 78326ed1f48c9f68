use crate::{error::PollemicError, shared::debounce::Debouncer};
use chrono_tz::Tz;
use pollemic_domain::{
    add_days, validate, DateWindow, DaySettings, FieldKey, NaiveDate, NaiveDateTime, OneTimePlan,
    ScheduleDraft, ScheduleKind, SchedulePlan, ValidationResult, Weekday, WeeklyPlan, ID,
};
use pollemic_infra::{ISys, PollemicContext};
use std::{
    collections::{BTreeSet, HashMap},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex, MutexGuard, PoisonError, Weak,
    },
    time::Duration,
};
use tokio::sync::watch;
use tracing::debug;

const FORM_DEBOUNCE: Duration = Duration::from_millis(100);
const SPECIFIC_DATES_DEBOUNCE: Duration = Duration::from_millis(300);
const WEEKDAYS_DEBOUNCE: Duration = Duration::from_millis(200);

struct DraftState {
    draft: ScheduleDraft,
    /// Payloads of the kinds that are not currently active
    stash: HashMap<ScheduleKind, SchedulePlan>,
    errors: ValidationResult,
}

struct StoreInner {
    state: Mutex<DraftState>,
    sys: Arc<dyn ISys>,
    timezone: Tz,
    results: watch::Sender<ValidationResult>,
    validation_runs: AtomicUsize,
    form: Debouncer,
    specific_dates: Debouncer,
    weekdays: Debouncer,
}

impl StoreInner {
    fn lock(&self) -> MutexGuard<'_, DraftState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn now(&self) -> NaiveDateTime {
        self.sys.now_in(&self.timezone)
    }

    fn run_validation(&self) -> ValidationResult {
        let now = self.now();
        let result = {
            let mut state = self.lock();
            let result = validate(&state.draft, now);
            state.errors = result.clone();
            result
        };
        self.validation_runs.fetch_add(1, Ordering::SeqCst);
        debug!("Validated schedule draft: {} error(s)", result.errors.len());
        self.results.send_replace(result.clone());
        result
    }

    fn publish_errors(&self, state: &DraftState) {
        self.results.send_replace(state.errors.clone());
    }
}

#[derive(Clone, Copy)]
enum Channel {
    Form,
    SpecificDates,
    Weekdays,
}

/// Mutable schedule draft which revalidates itself shortly after each edit.
///
/// Edits clear the stale error of the item being edited right away. The full
/// validation pass runs once the relevant quiet period has elapsed and reads
/// the draft as it is at that moment.
#[derive(Clone)]
pub struct ScheduleDraftStore {
    inner: Arc<StoreInner>,
}

impl ScheduleDraftStore {
    pub fn new(sys: Arc<dyn ISys>, timezone: Tz) -> Self {
        let (results, _) = watch::channel(ValidationResult::default());
        Self {
            inner: Arc::new(StoreInner {
                state: Mutex::new(DraftState {
                    draft: ScheduleDraft::new(),
                    stash: HashMap::new(),
                    errors: ValidationResult::default(),
                }),
                sys,
                timezone,
                results,
                validation_runs: AtomicUsize::new(0),
                form: Debouncer::new(FORM_DEBOUNCE),
                specific_dates: Debouncer::new(SPECIFIC_DATES_DEBOUNCE),
                weekdays: Debouncer::new(WEEKDAYS_DEBOUNCE),
            }),
        }
    }

    pub fn from_context(ctx: &PollemicContext) -> Self {
        Self::new(ctx.sys.clone(), ctx.config.timezone)
    }

    /// Store starting out from an existing draft
    pub fn with_draft(sys: Arc<dyn ISys>, timezone: Tz, draft: ScheduleDraft) -> Self {
        let store = Self::new(sys, timezone);
        store.inner.lock().draft = draft;
        store
    }

    pub fn draft(&self) -> ScheduleDraft {
        self.inner.lock().draft.clone()
    }

    /// Errors as of the latest validation pass, minus the ones cleared by edits since
    pub fn errors(&self) -> ValidationResult {
        self.inner.lock().errors.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ValidationResult> {
        self.inner.results.subscribe()
    }

    /// How many validation passes have run so far
    pub fn validation_runs(&self) -> usize {
        self.inner.validation_runs.load(Ordering::SeqCst)
    }

    fn schedule_validation(&self, channel: Channel) {
        let debouncer = match channel {
            Channel::Form => &self.inner.form,
            Channel::SpecificDates => &self.inner.specific_dates,
            Channel::Weekdays => &self.inner.weekdays,
        };
        let inner: Weak<StoreInner> = Arc::downgrade(&self.inner);
        debouncer.call(move || {
            if let Some(inner) = inner.upgrade() {
                inner.run_validation();
            }
        });
    }

    fn edit<R>(
        &self,
        channel: Channel,
        cleared: &[FieldKey],
        f: impl FnOnce(&mut DraftState) -> Result<R, PollemicError>,
    ) -> Result<R, PollemicError> {
        let res = {
            let mut state = self.inner.lock();
            let res = f(&mut state)?;
            for key in cleared {
                state.errors.clear(*key);
            }
            self.inner.publish_errors(&state);
            res
        };
        self.schedule_validation(channel);
        Ok(res)
    }

    /// Same as `edit` for changes that always apply
    fn apply<R>(
        &self,
        channel: Channel,
        cleared: &[FieldKey],
        f: impl FnOnce(&mut DraftState) -> R,
    ) -> R {
        let res = {
            let mut state = self.inner.lock();
            let res = f(&mut state);
            for key in cleared {
                state.errors.clear(*key);
            }
            self.inner.publish_errors(&state);
            res
        };
        self.schedule_validation(channel);
        res
    }

    pub fn set_survey(&self, survey_id: Option<ID>) {
        self.apply(Channel::Form, &[FieldKey::Survey], |state| {
            state.draft.survey_id = survey_id;
        });
    }

    pub fn set_target_groups(&self, group_ids: BTreeSet<ID>) {
        self.apply(Channel::Form, &[FieldKey::Groups], |state| {
            state.draft.target_group_ids = group_ids;
        });
    }

    /// Adds or removes a group, returning whether it is now selected
    pub fn toggle_group(&self, group_id: ID) -> bool {
        self.apply(Channel::Form, &[FieldKey::Groups], |state| {
            let groups = &mut state.draft.target_group_ids;
            if groups.remove(&group_id) {
                false
            } else {
                groups.insert(group_id);
                true
            }
        })
    }

    /// Unselects the given groups, leaving the rest of the draft untouched
    pub fn remove_groups(&self, group_ids: &[ID]) {
        self.apply(Channel::Form, &[FieldKey::Groups], |state| {
            for group_id in group_ids {
                state.draft.target_group_ids.remove(group_id);
            }
        });
    }

    pub fn set_title(&self, title: Option<String>) {
        self.apply(Channel::Form, &[], |state| {
            state.draft.title = title;
        });
    }

    /// Switches the active schedule kind. The payload of the kind being left
    /// is kept aside and restored when switching back.
    pub fn set_kind(&self, kind: ScheduleKind) {
        self.apply(Channel::Form, &[FieldKey::EmptySchedule], |state| {
            if state.draft.kind() == kind {
                return;
            }
            let next = state
                .stash
                .remove(&kind)
                .unwrap_or_else(|| SchedulePlan::empty(kind));
            let previous = std::mem::replace(&mut state.draft.schedule, next);
            state.stash.insert(previous.kind(), previous);
        });
    }

    pub fn edit_one_time<F>(&self, f: F) -> Result<(), PollemicError>
    where
        F: FnOnce(&mut OneTimePlan),
    {
        self.edit(Channel::Form, &[FieldKey::OneTime], |state| {
            match &mut state.draft.schedule {
                SchedulePlan::OneTime(plan) => {
                    f(plan);
                    Ok(())
                }
                other => Err(inactive(ScheduleKind::OneTime, other.kind())),
            }
        })
    }

    /// Appends a window starting tomorrow and returns its index
    pub fn add_window(&self) -> Result<usize, PollemicError> {
        let tomorrow = add_days(self.inner.now().date(), 1).ok_or_else(|| {
            PollemicError::InvalidEdit("No date is available after today".into())
        })?;
        self.add_window_on(tomorrow)
    }

    pub fn add_window_on(&self, start_date: NaiveDate) -> Result<usize, PollemicError> {
        self.edit(
            Channel::SpecificDates,
            &[FieldKey::SpecificDates, FieldKey::EmptySchedule],
            |state| match &mut state.draft.schedule {
                SchedulePlan::SpecificDates(plan) => {
                    plan.windows.push(DateWindow::starting(start_date));
                    Ok(plan.windows.len() - 1)
                }
                other => Err(inactive(ScheduleKind::SpecificDates, other.kind())),
            },
        )
    }

    pub fn remove_window(&self, index: usize) -> Result<DateWindow, PollemicError> {
        self.edit(
            Channel::SpecificDates,
            &[FieldKey::SpecificDates],
            |state| {
                let removed = match &mut state.draft.schedule {
                    SchedulePlan::SpecificDates(plan) if index < plan.windows.len() => {
                        plan.windows.remove(index)
                    }
                    SchedulePlan::SpecificDates(_) => return Err(missing_window(index)),
                    other => return Err(inactive(ScheduleKind::SpecificDates, other.kind())),
                };
                // Indices after the removed window shift, so their errors are stale
                state
                    .errors
                    .errors
                    .retain(|key, _| !matches!(key, FieldKey::SpecificDate(i) if *i >= index));
                Ok(removed)
            },
        )
    }

    pub fn edit_window<F>(&self, index: usize, f: F) -> Result<(), PollemicError>
    where
        F: FnOnce(&mut DateWindow),
    {
        self.edit(
            Channel::SpecificDates,
            &[FieldKey::SpecificDate(index), FieldKey::SpecificDates],
            |state| match &mut state.draft.schedule {
                SchedulePlan::SpecificDates(plan) => match plan.windows.get_mut(index) {
                    Some(window) => {
                        f(window);
                        Ok(())
                    }
                    None => Err(missing_window(index)),
                },
                other => Err(inactive(ScheduleKind::SpecificDates, other.kind())),
            },
        )
    }

    /// Selects or deselects a weekday, returning whether it is now selected
    pub fn toggle_weekday(&self, day: Weekday) -> Result<bool, PollemicError> {
        self.edit(
            Channel::Weekdays,
            &[FieldKey::weekday(day), FieldKey::Weekly, FieldKey::EmptySchedule],
            |state| weekly_plan(state).map(|plan| plan.weekdays.toggle(day)),
        )
    }

    pub fn edit_weekday<F>(&self, day: Weekday, f: F) -> Result<(), PollemicError>
    where
        F: FnOnce(&mut DaySettings),
    {
        self.edit(
            Channel::Weekdays,
            &[FieldKey::weekday(day), FieldKey::Weekly],
            |state| weekly_plan(state).map(|plan| f(plan.settings.get_mut(day))),
        )
    }

    pub fn set_period(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<(), PollemicError> {
        self.edit(
            Channel::Form,
            &[FieldKey::StartDate, FieldKey::EndDate],
            |state| {
                let plan = weekly_plan(state)?;
                plan.period_start = start;
                plan.period_end = end;
                Ok(())
            },
        )
    }

    /// Runs a validation pass right away, superseding any pending one
    pub fn validate_now(&self) -> ValidationResult {
        self.cancel_pending();
        self.inner.run_validation()
    }

    /// Hands out the draft for submission if it passes validation right now
    pub fn take_for_submission(&self) -> Result<ScheduleDraft, PollemicError> {
        let result = self.validate_now();
        match result.summary() {
            None => Ok(self.draft()),
            Some(summary) => Err(PollemicError::InvalidDraft(summary)),
        }
    }

    /// Discards the draft, e.g. after a successful submission
    pub fn reset(&self) {
        self.cancel_pending();
        let mut state = self.inner.lock();
        state.draft = ScheduleDraft::new();
        state.stash.clear();
        state.errors = ValidationResult::default();
        self.inner.publish_errors(&state);
    }

    fn cancel_pending(&self) {
        self.inner.form.cancel();
        self.inner.specific_dates.cancel();
        self.inner.weekdays.cancel();
    }
}

fn weekly_plan(state: &mut DraftState) -> Result<&mut WeeklyPlan, PollemicError> {
    match &mut state.draft.schedule {
        SchedulePlan::Weekly(plan) => Ok(plan),
        other => Err(inactive(ScheduleKind::Weekly, other.kind())),
    }
}

fn inactive(expected: ScheduleKind, active: ScheduleKind) -> PollemicError {
    PollemicError::InvalidEdit(format!(
        "{} settings can not be edited while the schedule is {}",
        expected.display_name(),
        active.display_name()
    ))
}

fn missing_window(index: usize) -> PollemicError {
    PollemicError::InvalidEdit(format!("There is no date window at index {}", index))
}

#[cfg(test)]
mod test {
    use super::*;
    use pollemic_domain::TimeOfDay;
    use pollemic_infra::FixedSys;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn setup() -> ScheduleDraftStore {
        ScheduleDraftStore::new(Arc::new(FixedSys::at_utc(now())), Tz::UTC)
    }

    fn time(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn edits_inside_one_quiet_period_validate_once() {
        let store = setup();
        let mut results = store.subscribe();

        store.set_survey(Some(ID::from(1)));
        tokio::time::sleep(Duration::from_millis(50)).await;
        store.set_survey(None);
        assert_eq!(store.validation_runs(), 0);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(store.validation_runs(), 1);
        assert!(results.has_changed().unwrap());
        let latest = results.borrow_and_update().clone();
        assert_eq!(
            latest.error(FieldKey::Survey),
            Some("Please select a survey")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn channels_have_their_own_quiet_periods() {
        let store = setup();
        store.set_kind(ScheduleKind::SpecificDates);
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(store.validation_runs(), 1);

        store.add_window().unwrap();
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(store.validation_runs(), 1);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(store.validation_runs(), 2);

        store.set_kind(ScheduleKind::Weekly);
        tokio::time::sleep(Duration::from_millis(150)).await;
        store.toggle_weekday(Weekday::Mon).unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(store.validation_runs(), 3);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(store.validation_runs(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn editing_a_window_clears_its_stale_error() {
        let store = setup();
        store.set_kind(ScheduleKind::SpecificDates);
        let index = store.add_window_on(now().date()).unwrap();
        store.edit_window(index, |w| w.start_time = time("08:00")).unwrap();

        let errors = store.validate_now();
        assert_eq!(
            errors.error(FieldKey::SpecificDate(0)),
            Some("Start date and time must be in the future")
        );

        store
            .edit_window(0, |w| w.start_date = add_days(w.start_date, 2).unwrap())
            .unwrap();
        assert_eq!(store.errors().error(FieldKey::SpecificDate(0)), None);
        assert_eq!(store.errors().error(FieldKey::SpecificDates), None);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(store.errors().error(FieldKey::SpecificDate(0)), None);
    }

    #[test]
    fn new_windows_start_tomorrow() {
        let store = setup();
        store.set_kind(ScheduleKind::SpecificDates);
        store.add_window().unwrap();
        match store.draft().schedule {
            SchedulePlan::SpecificDates(plan) => {
                assert_eq!(
                    plan.windows,
                    vec![DateWindow::starting(
                        NaiveDate::from_ymd_opt(2025, 3, 11).unwrap()
                    )]
                );
            }
            other => panic!("unexpected plan: {:?}", other),
        }
    }

    #[test]
    fn switching_kinds_keeps_the_inactive_payload() {
        let store = setup();
        store
            .edit_one_time(|plan| plan.deadline_time = time("15:30"))
            .unwrap();
        store.set_kind(ScheduleKind::Weekly);
        assert!(store.edit_one_time(|_| {}).is_err());
        store.toggle_weekday(Weekday::Fri).unwrap();

        store.set_kind(ScheduleKind::OneTime);
        match store.draft().schedule {
            SchedulePlan::OneTime(plan) => assert_eq!(plan.deadline_time, time("15:30")),
            other => panic!("unexpected plan: {:?}", other),
        }
        store.set_kind(ScheduleKind::Weekly);
        match store.draft().schedule {
            SchedulePlan::Weekly(plan) => assert!(plan.weekdays.contains(Weekday::Fri)),
            other => panic!("unexpected plan: {:?}", other),
        }
    }

    #[test]
    fn removing_a_window_drops_shifted_errors() {
        let store = setup();
        store.set_kind(ScheduleKind::SpecificDates);
        store.add_window_on(now().date()).unwrap();
        store.add_window_on(now().date()).unwrap();
        store.edit_window(1, |w| w.start_time = time("08:00")).unwrap();
        store.validate_now();
        assert!(store.errors().error(FieldKey::SpecificDate(1)).is_some());

        store.remove_window(0).unwrap();
        assert_eq!(store.errors().error(FieldKey::SpecificDate(1)), None);
        assert!(store.remove_window(4).is_err());
    }

    #[test]
    fn group_selection_can_shrink() {
        let store = setup();
        assert!(store.toggle_group(ID::from(1)));
        assert!(store.toggle_group(ID::from(2)));
        assert!(store.toggle_group(ID::from(3)));
        assert!(!store.toggle_group(ID::from(3)));

        store.remove_groups(&[ID::from(1), ID::from(5)]);
        assert_eq!(
            store.draft().target_group_ids.into_iter().collect::<Vec<_>>(),
            vec![ID::from(2)]
        );
    }

    #[test]
    fn it_refuses_to_hand_out_invalid_drafts() {
        let store = setup();
        let err = store.take_for_submission().unwrap_err();
        assert_eq!(
            err,
            PollemicError::InvalidDraft("Cannot submit an empty schedule".into())
        );

        store.set_survey(Some(ID::from(4)));
        store.toggle_group(ID::from(9));
        store
            .edit_one_time(|plan| {
                plan.deadline_date = Some(NaiveDate::from_ymd_opt(2025, 3, 12).unwrap())
            })
            .unwrap();
        let draft = store.take_for_submission().unwrap();
        assert_eq!(draft.survey_id, Some(ID::from(4)));

        store.reset();
        assert_eq!(store.draft(), ScheduleDraft::new());
        assert!(store.errors().is_valid());
    }
}
