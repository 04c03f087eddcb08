//! The analytical report catalog.
//!
//! Seventeen parameterless reports over the photo-sharing schema, split
//! into user-engagement and photo-engagement groups. Each report is a pure
//! read: same database contents, same result. The enum is closed on
//! purpose — an unknown selector fails at `from_key`, never inside the
//! execution path.
//!
//! Shared policies: "maximum" reports return every row tied at the max,
//! zero denominators yield 0 instead of failing, and symmetric pairs
//! (mutual follows, similar-tag pairs) are canonicalized lower-id-first so
//! each unordered pair appears exactly once.

mod sql;

use crate::error::{Error, Result};

/// Which storage engine a statement is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

/// Report grouping as presented to the analyst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    User,
    Photo,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::User => "user",
            ReportKind::Photo => "photo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Report {
    MostFollowers,
    MostComments,
    LikedEveryPhoto,
    UsersWithoutPhotos,
    LikeToCommentRatio,
    MoreFollowersThanFollowing,
    UniqueTags,
    TagContribution,
    MutualFollows,
    PhotoLikeRanks,
    MostLikedPhoto,
    AverageLikesPerPhoto,
    PhotosWithoutLikes,
    MultiTaggedPhotos,
    TopCommentedPhotos,
    TopEngagementPhotos,
    SimilarTagPhotos,
}

impl Report {
    pub const ALL: [Report; 17] = [
        Report::MostFollowers,
        Report::MostComments,
        Report::LikedEveryPhoto,
        Report::UsersWithoutPhotos,
        Report::LikeToCommentRatio,
        Report::MoreFollowersThanFollowing,
        Report::UniqueTags,
        Report::TagContribution,
        Report::MutualFollows,
        Report::PhotoLikeRanks,
        Report::MostLikedPhoto,
        Report::AverageLikesPerPhoto,
        Report::PhotosWithoutLikes,
        Report::MultiTaggedPhotos,
        Report::TopCommentedPhotos,
        Report::TopEngagementPhotos,
        Report::SimilarTagPhotos,
    ];

    /// Stable CLI/config key.
    pub fn key(self) -> &'static str {
        match self {
            Report::MostFollowers => "most-followers",
            Report::MostComments => "most-comments",
            Report::LikedEveryPhoto => "liked-every-photo",
            Report::UsersWithoutPhotos => "no-photos",
            Report::LikeToCommentRatio => "like-comment-ratio",
            Report::MoreFollowersThanFollowing => "more-followers-than-following",
            Report::UniqueTags => "unique-tags",
            Report::TagContribution => "tag-contribution",
            Report::MutualFollows => "mutual-follows",
            Report::PhotoLikeRanks => "photo-like-ranks",
            Report::MostLikedPhoto => "most-liked-photo",
            Report::AverageLikesPerPhoto => "avg-likes-per-photo",
            Report::PhotosWithoutLikes => "photos-without-likes",
            Report::MultiTaggedPhotos => "multi-tagged-photos",
            Report::TopCommentedPhotos => "top-commented-photos",
            Report::TopEngagementPhotos => "top-engagement-photos",
            Report::SimilarTagPhotos => "similar-tag-photos",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Report::MostFollowers => "Users with Most Followers",
            Report::MostComments => "Top Users with Most Comments",
            Report::LikedEveryPhoto => "Users who Have Liked Every Photo",
            Report::UsersWithoutPhotos => "Users Who Have Not Posted Photos",
            Report::LikeToCommentRatio => "Top 5 Users by Like-to-Comment Ratio",
            Report::MoreFollowersThanFollowing => {
                "Users Whose Followers Count Exceeds Following Count"
            }
            Report::UniqueTags => "Users with Unique Tags",
            Report::TagContribution => "User's Contribution to Tag Popularity",
            Report::MutualFollows => "Users Who Follow Each Other",
            Report::PhotoLikeRanks => "Photos with Rank and Like Counts",
            Report::MostLikedPhoto => "Photo with the Most Likes",
            Report::AverageLikesPerPhoto => "Average Likes per Photo",
            Report::PhotosWithoutLikes => "Photos with No Likes",
            Report::MultiTaggedPhotos => "Photos Tagged with Multiple Tags",
            Report::TopCommentedPhotos => "Top 5 Photos by Comment Count",
            Report::TopEngagementPhotos => "Top 5 Photos by Engagement",
            Report::SimilarTagPhotos => "Photos with Similar Tags",
        }
    }

    pub fn kind(self) -> ReportKind {
        match self {
            Report::MostFollowers
            | Report::MostComments
            | Report::LikedEveryPhoto
            | Report::UsersWithoutPhotos
            | Report::LikeToCommentRatio
            | Report::MoreFollowersThanFollowing
            | Report::UniqueTags
            | Report::TagContribution
            | Report::MutualFollows => ReportKind::User,
            Report::PhotoLikeRanks
            | Report::MostLikedPhoto
            | Report::AverageLikesPerPhoto
            | Report::PhotosWithoutLikes
            | Report::MultiTaggedPhotos
            | Report::TopCommentedPhotos
            | Report::TopEngagementPhotos
            | Report::SimilarTagPhotos => ReportKind::Photo,
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Report::MostFollowers => "all users tied at the maximum follower count",
            Report::MostComments => "all users tied at the maximum comment count (zero counts included)",
            Report::LikedEveryPhoto => "users whose distinct liked photos cover every photo",
            Report::UsersWithoutPhotos => "users with no posted photo at all",
            Report::LikeToCommentRatio => "top 5 by likes-authored over comments-authored, 0 when no comments",
            Report::MoreFollowersThanFollowing => "users followed by more people than they follow",
            Report::UniqueTags => "users owning a tag no other user's photo carries",
            Report::TagContribution => "per user and tag, how many photo-tag pairs they contributed",
            Report::MutualFollows => "mutual follow pairs, lower id first, one row per pair",
            Report::PhotoLikeRanks => "photos with dense like-rank up to 5, ties included",
            Report::MostLikedPhoto => "all photos tied at the maximum like count",
            Report::AverageLikesPerPhoto => "per photo its like count (grouping is per photo); zero-like photos excluded",
            Report::PhotosWithoutLikes => "photos no one has liked",
            Report::MultiTaggedPhotos => "photos carrying more than 4 tags",
            Report::TopCommentedPhotos => "comment-count ranking capped at 5 rows (ties may be cut)",
            Report::TopEngagementPhotos => "top 5 by likes plus comments",
            Report::SimilarTagPhotos => "photo pairs sharing at least 3 tags, lower id first",
        }
    }

    /// Statement text compiled for the given storage dialect.
    pub fn sql(self, dialect: Dialect) -> &'static str {
        sql::statement(self, dialect)
    }

    pub fn from_key(key: &str) -> Result<Report> {
        Report::ALL
            .iter()
            .copied()
            .find(|r| r.key() == key)
            .ok_or_else(|| Error::ReportNotFound(key.to_string()))
    }
}
