//! Enumerated parameter values shared by the registries

/// Playlist loop mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopMode {
    Sequential,
    TimeSync,
    Random,
}

impl_wire_enum_conversions!(LoopMode {
    Sequential => "sequential",
    TimeSync => "timesync",
    Random => "random",
});

/// When a slide starts being shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SchedulingStart {
    #[default]
    Loop,
    DateTime,
    InWeek,
}

impl_wire_enum_conversions!(SchedulingStart {
    Loop => "loop",
    DateTime => "datetime",
    InWeek => "inweek",
});

/// When a `datetime` slide stops being shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SchedulingEnd {
    #[default]
    Loop,
    DateTime,
}

impl_wire_enum_conversions!(SchedulingEnd {
    Loop => "loop",
    DateTime => "datetime",
});

/// Where new content lands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FolderDestination {
    #[default]
    List,
    Path,
    Root,
}

impl_wire_enum_conversions!(FolderDestination {
    List => "list",
    Path => "path",
    Root => "root",
});

/// How a content folder is looked up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FolderLookup {
    #[default]
    Id,
    Path,
}

impl_wire_enum_conversions!(FolderLookup {
    Id => "id",
    Path => "path",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_mode_tags() {
        assert_eq!("timesync".parse::<LoopMode>().unwrap(), LoopMode::TimeSync);
        assert_eq!(LoopMode::TimeSync.as_str(), "timesync");
        assert!("shuffle".parse::<LoopMode>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(SchedulingStart::default(), SchedulingStart::Loop);
        assert_eq!(SchedulingEnd::default(), SchedulingEnd::Loop);
        assert_eq!(FolderDestination::default(), FolderDestination::List);
        assert_eq!(FolderLookup::default(), FolderLookup::Id);
    }

    #[test]
    fn test_scheduling_tags() {
        assert_eq!("inweek".parse::<SchedulingStart>().unwrap(), SchedulingStart::InWeek);
        assert_eq!("datetime".parse::<SchedulingEnd>().unwrap(), SchedulingEnd::DateTime);
        assert!("inweek".parse::<SchedulingEnd>().is_err());
    }
}
