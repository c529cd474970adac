//! Collaborator boundaries.
//!
//! The engine owns no transport: time-slot configuration, persisted
//! entries, the course palette, availability lookups, and export rendering
//! are all abstract service calls behind traits. The in-memory
//! implementations here back the tests and suit embedding; REST- or
//! database-backed implementations live in the surrounding application.
//!
//! Availability lookups are advisory: the manual-entry editor flags busy
//! faculty and venues but never enforces them.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::models::{CourseDescriptor, DayOfWeek, ScheduleEntry, TimeSlotDefinition};

/// Failure reported by a collaborator call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// The collaborator could not be reached.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    /// The requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
    /// The collaborator rejected a write.
    #[error("Persistence rejected: {0}")]
    Persistence(String),
}

/// Source of raw time-slot configuration.
pub trait TimeSlotSource {
    /// Lists every configured time slot.
    fn list_time_slots(&self) -> Result<Vec<TimeSlotDefinition>, ServiceError>;
}

/// Persisted schedule storage for (department, semester) pairs.
pub trait ScheduleRepository {
    /// Loads the stored entries for a department and semester.
    fn list_schedule_entries(
        &self,
        department: &str,
        semester: u8,
    ) -> Result<Vec<ScheduleEntry>, ServiceError>;

    /// Persists the full entry list. Invoked explicitly by the user, never
    /// automatically after an engine operation.
    fn save_schedule(
        &self,
        department: &str,
        semester: u8,
        entries: &[ScheduleEntry],
    ) -> Result<(), ServiceError>;
}

/// Course palette and per-course default suggestions.
pub trait CourseCatalog {
    /// Courses offered by a department.
    fn list_courses(&self, department: &str) -> Result<Vec<CourseDescriptor>, ServiceError>;

    /// Default faculty per course code.
    fn faculty_defaults(&self, department: &str)
        -> Result<HashMap<String, String>, ServiceError>;

    /// Default venue per course code.
    fn venue_defaults(&self, department: &str) -> Result<HashMap<String, String>, ServiceError>;
}

/// Advisory faculty/venue availability for one cell.
pub trait AvailabilityDirectory {
    /// Faculty free at the given cell.
    fn available_faculty(
        &self,
        department: &str,
        day: DayOfWeek,
        period: u8,
    ) -> Result<Vec<String>, ServiceError>;

    /// Venues free at the given cell.
    fn available_venues(
        &self,
        department: &str,
        semester: u8,
        day: DayOfWeek,
        period: u8,
    ) -> Result<Vec<String>, ServiceError>;
}

/// Renders the current entry list into an opaque export document.
pub trait SnapshotExporter {
    /// Produces the rendered document bytes.
    fn export(&self, entries: &[ScheduleEntry]) -> Result<Vec<u8>, ServiceError>;
}

/// In-memory [`TimeSlotSource`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryTimeSlotSource {
    slots: Vec<TimeSlotDefinition>,
}

impl InMemoryTimeSlotSource {
    /// Creates a source over a fixed slot list.
    pub fn new(slots: Vec<TimeSlotDefinition>) -> Self {
        Self { slots }
    }
}

impl TimeSlotSource for InMemoryTimeSlotSource {
    fn list_time_slots(&self) -> Result<Vec<TimeSlotDefinition>, ServiceError> {
        Ok(self.slots.clone())
    }
}

/// In-memory [`ScheduleRepository`], keyed by (department, semester).
#[derive(Debug, Default)]
pub struct InMemoryScheduleRepository {
    saved: RefCell<HashMap<(String, u8), Vec<ScheduleEntry>>>,
}

impl InMemoryScheduleRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a stored schedule.
    pub fn seed(&self, department: &str, semester: u8, entries: Vec<ScheduleEntry>) {
        self.saved
            .borrow_mut()
            .insert((department.to_string(), semester), entries);
    }
}

impl ScheduleRepository for InMemoryScheduleRepository {
    fn list_schedule_entries(
        &self,
        department: &str,
        semester: u8,
    ) -> Result<Vec<ScheduleEntry>, ServiceError> {
        Ok(self
            .saved
            .borrow()
            .get(&(department.to_string(), semester))
            .cloned()
            .unwrap_or_default())
    }

    fn save_schedule(
        &self,
        department: &str,
        semester: u8,
        entries: &[ScheduleEntry],
    ) -> Result<(), ServiceError> {
        self.saved
            .borrow_mut()
            .insert((department.to_string(), semester), entries.to_vec());
        Ok(())
    }
}

/// In-memory [`CourseCatalog`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryCourseCatalog {
    courses: Vec<CourseDescriptor>,
    faculty: HashMap<String, String>,
    venues: HashMap<String, String>,
}

impl InMemoryCourseCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course to the palette.
    pub fn with_course(mut self, course: CourseDescriptor) -> Self {
        self.courses.push(course);
        self
    }

    /// Adds a default faculty suggestion for a course code.
    pub fn with_faculty_default(
        mut self,
        course_code: impl Into<String>,
        faculty: impl Into<String>,
    ) -> Self {
        self.faculty.insert(course_code.into(), faculty.into());
        self
    }

    /// Adds a default venue suggestion for a course code.
    pub fn with_venue_default(
        mut self,
        course_code: impl Into<String>,
        venue: impl Into<String>,
    ) -> Self {
        self.venues.insert(course_code.into(), venue.into());
        self
    }
}

impl CourseCatalog for InMemoryCourseCatalog {
    fn list_courses(&self, _department: &str) -> Result<Vec<CourseDescriptor>, ServiceError> {
        Ok(self.courses.clone())
    }

    fn faculty_defaults(
        &self,
        _department: &str,
    ) -> Result<HashMap<String, String>, ServiceError> {
        Ok(self.faculty.clone())
    }

    fn venue_defaults(&self, _department: &str) -> Result<HashMap<String, String>, ServiceError> {
        Ok(self.venues.clone())
    }
}

/// In-memory [`AvailabilityDirectory`] with explicit busy markings.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAvailabilityDirectory {
    faculty: Vec<String>,
    venues: Vec<String>,
    busy_faculty: HashSet<(String, DayOfWeek, u8)>,
    busy_venues: HashSet<(String, DayOfWeek, u8)>,
}

impl InMemoryAvailabilityDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a faculty member.
    pub fn with_faculty(mut self, name: impl Into<String>) -> Self {
        self.faculty.push(name.into());
        self
    }

    /// Registers a venue.
    pub fn with_venue(mut self, name: impl Into<String>) -> Self {
        self.venues.push(name.into());
        self
    }

    /// Marks a faculty member busy at a cell.
    pub fn mark_faculty_busy(&mut self, name: impl Into<String>, day: DayOfWeek, period: u8) {
        self.busy_faculty.insert((name.into(), day, period));
    }

    /// Marks a venue busy at a cell.
    pub fn mark_venue_busy(&mut self, name: impl Into<String>, day: DayOfWeek, period: u8) {
        self.busy_venues.insert((name.into(), day, period));
    }
}

impl AvailabilityDirectory for InMemoryAvailabilityDirectory {
    fn available_faculty(
        &self,
        _department: &str,
        day: DayOfWeek,
        period: u8,
    ) -> Result<Vec<String>, ServiceError> {
        Ok(self
            .faculty
            .iter()
            .filter(|name| !self.busy_faculty.contains(&((*name).clone(), day, period)))
            .cloned()
            .collect())
    }

    fn available_venues(
        &self,
        _department: &str,
        _semester: u8,
        day: DayOfWeek,
        period: u8,
    ) -> Result<Vec<String>, ServiceError> {
        Ok(self
            .venues
            .iter()
            .filter(|name| !self.busy_venues.contains(&((*name).clone(), day, period)))
            .cloned()
            .collect())
    }
}
