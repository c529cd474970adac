//! Schedule entry and course models.
//!
//! A [`ScheduleEntry`] is one occupied (day, period) cell for one section
//! of a class. Entries are owned exclusively by the entry store for the
//! loaded (department, semester) and mutated only through the session
//! operations.
//!
//! # Logical Classes
//! Two entries belong to the same logical class when they share day,
//! course code, and session type. A lab class spans two entries at
//! consecutive periods; a theory class may span several parallel section
//! entries sharing one cell. Collision handling, moves, swaps, and deletes
//! always act on whole logical classes.

use serde::{Deserialize, Serialize};

use super::slot::DayOfWeek;

/// Kind of class session a cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionType {
    /// A lecture; a cell may hold parallel sections of the same course.
    Theory,
    /// A two-period practical; always exists as a pair of entries.
    Lab,
    /// Mentoring hour; singleton cell.
    Mentor,
    /// Open elective hour; singleton cell.
    OpenElective,
}

impl SessionType {
    /// Number of consecutive periods one placement of this session
    /// occupies.
    #[inline]
    pub fn span(&self) -> u8 {
        match self {
            SessionType::Lab => 2,
            SessionType::Theory | SessionType::Mentor | SessionType::OpenElective => 1,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            SessionType::Theory => "Theory",
            SessionType::Lab => "Lab",
            SessionType::Mentor => "Mentor",
            SessionType::OpenElective => "Open Elective",
        }
    }
}

/// A course as presented on the drag palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDescriptor {
    /// Course code (e.g. "CS201").
    pub code: String,
    /// Course name.
    pub name: String,
    /// Session kind placements of this course produce.
    pub session_type: SessionType,
}

impl CourseDescriptor {
    /// Creates a course descriptor.
    pub fn new(code: impl Into<String>, name: impl Into<String>, session_type: SessionType) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            session_type,
        }
    }

    /// Whether placements of this course occupy a two-period block.
    #[inline]
    pub fn is_lab(&self) -> bool {
        self.session_type == SessionType::Lab
    }
}

/// A (day, period) grid cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellKey {
    /// Day of week.
    pub day: DayOfWeek,
    /// Period number.
    pub period: u8,
}

impl CellKey {
    /// Creates a cell key.
    pub fn new(day: DayOfWeek, period: u8) -> Self {
        Self { day, period }
    }
}

/// One scheduled cell occupancy for one section of a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Department code.
    pub department: String,
    /// Semester number.
    pub semester: u8,
    /// Course code.
    pub course_code: String,
    /// Course name.
    pub course_name: String,
    /// Session kind.
    pub session_type: SessionType,
    /// Assigned faculty, if any.
    pub faculty: Option<String>,
    /// Assigned venue, if any.
    pub venue: Option<String>,
    /// Day of week.
    pub day: DayOfWeek,
    /// Period number.
    pub period: u8,
    /// Parallel section number for multi-section theory cells.
    pub section: Option<u8>,
}

impl ScheduleEntry {
    /// Creates an entry for one cell.
    pub fn new(
        department: impl Into<String>,
        semester: u8,
        course: &CourseDescriptor,
        day: DayOfWeek,
        period: u8,
    ) -> Self {
        Self {
            department: department.into(),
            semester,
            course_code: course.code.clone(),
            course_name: course.name.clone(),
            session_type: course.session_type,
            faculty: None,
            venue: None,
            day,
            period,
            section: None,
        }
    }

    /// Sets the faculty name.
    pub fn with_faculty(mut self, faculty: impl Into<String>) -> Self {
        self.faculty = Some(faculty.into());
        self
    }

    /// Sets the venue name.
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    /// Sets the parallel section number.
    pub fn with_section(mut self, section: u8) -> Self {
        self.section = Some(section);
        self
    }

    /// The cell this entry occupies.
    #[inline]
    pub fn cell(&self) -> CellKey {
        CellKey::new(self.day, self.period)
    }

    /// Whether two entries represent the same logical class.
    ///
    /// Same day, course code, and session type; for labs this matches both
    /// halves of the pair, for theory it matches every parallel section.
    #[inline]
    pub fn same_logical_class(&self, other: &ScheduleEntry) -> bool {
        self.day == other.day
            && self.course_code == other.course_code
            && self.session_type == other.session_type
    }
}
