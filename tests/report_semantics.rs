//! End-to-end semantics of every catalog report against seeded in-memory
//! databases.

use socialens::catalog::Report;
use socialens::db::{Database, Rowset};

fn db_with(seed: &str) -> Database {
    let db = Database::open_in_memory().unwrap();
    db.initialize().unwrap();
    db.execute_batch(seed).unwrap();
    db
}

fn ints(rowset: &Rowset, column: &str) -> Vec<i64> {
    rowset
        .column_values(column)
        .iter()
        .filter_map(|v| v.as_i64())
        .collect()
}

#[test]
fn most_followers_returns_every_tied_maximum() {
    let db = db_with(
        r#"
        INSERT INTO users (id, username) VALUES (1,'ava'), (2,'ben'), (3,'cal'), (4,'dee');
        INSERT INTO follows (follower_id, followee_id) VALUES
            (2,1), (3,1),
            (3,2), (4,2),
            (1,3);
        "#,
    );
    let rs = db.run_report(Report::MostFollowers).unwrap();

    // ava and ben tie at two followers; cal (one) is out
    let mut followees = ints(&rs, "followee_id");
    followees.sort();
    assert_eq!(followees, vec![1, 2]);
    assert!(ints(&rs, "followers_count").iter().all(|&c| c == 2));
}

#[test]
fn most_comments_keeps_all_tied_users() {
    let db = db_with(
        r#"
        INSERT INTO users (id, username) VALUES (1,'ava'), (2,'ben'), (3,'cal');
        INSERT INTO photos (id, user_id, image_url) VALUES (1, 1, 'p1.jpg');
        INSERT INTO comments (user_id, photo_id, comment_text) VALUES
            (1, 1, 'a'), (1, 1, 'b'),
            (2, 1, 'c'), (2, 1, 'd'),
            (3, 1, 'e');
        "#,
    );
    let rs = db.run_report(Report::MostComments).unwrap();

    let mut user_ids = ints(&rs, "id");
    user_ids.sort();
    assert_eq!(user_ids, vec![1, 2]);
    assert!(ints(&rs, "comments_count").iter().all(|&c| c == 2));
}

#[test]
fn most_comments_with_no_comments_ties_everyone_at_zero() {
    let db = db_with(
        "INSERT INTO users (id, username) VALUES (1,'ava'), (2,'ben'), (3,'cal');",
    );
    let rs = db.run_report(Report::MostComments).unwrap();

    assert_eq!(rs.len(), 3);
    assert!(ints(&rs, "comments_count").iter().all(|&c| c == 0));
}

#[test]
fn liked_every_photo_deduplicates_repeat_likes() {
    let db = db_with(
        r#"
        INSERT INTO users (id, username) VALUES (1,'ava'), (2,'ben'), (3,'cal');
        INSERT INTO photos (id, user_id, image_url) VALUES
            (1, 1, 'p1.jpg'), (2, 1, 'p2.jpg');
        INSERT INTO likes (user_id, photo_id) VALUES
            (1, 1), (1, 1), (1, 2),
            (2, 1), (2, 1);
        "#,
    );
    let rs = db.run_report(Report::LikedEveryPhoto).unwrap();

    // ava's distinct liked set covers both photos; ben's repeat likes of
    // photo 1 must not count as coverage
    assert_eq!(ints(&rs, "user_id"), vec![1]);
}

#[test]
fn users_without_photos_partitions_the_user_set() {
    let db = db_with(
        r#"
        INSERT INTO users (id, username) VALUES (1,'ava'), (2,'ben'), (3,'cal');
        INSERT INTO photos (id, user_id, image_url) VALUES (1, 1, 'p1.jpg');
        "#,
    );
    let rs = db.run_report(Report::UsersWithoutPhotos).unwrap();
    let mut without: Vec<i64> = ints(&rs, "id");
    without.sort();
    assert_eq!(without, vec![2, 3]);

    // disjoint from posters, union covers every user
    let posters = db.run_sql("SELECT DISTINCT user_id FROM photos").unwrap();
    let posters = ints(&posters, "user_id");
    assert!(without.iter().all(|id| !posters.contains(id)));
    let all_users = db.run_sql("SELECT id FROM users").unwrap();
    assert_eq!(without.len() + posters.len(), all_users.len());
}

#[test]
fn ratio_is_zero_for_zero_comments_not_an_error() {
    let db = db_with(
        r#"
        INSERT INTO users (id, username) VALUES (1,'ava'), (2,'ben'), (3,'cal');
        INSERT INTO photos (id, user_id, image_url) VALUES (1, 1, 'p1.jpg');
        INSERT INTO likes (user_id, photo_id) VALUES
            (1, 1), (1, 1), (1, 1), (1, 1), (1, 1), (1, 1),
            (2, 1),
            (3, 1), (3, 1), (3, 1), (3, 1);
        INSERT INTO comments (user_id, photo_id, comment_text) VALUES
            (1, 1, 'a'), (1, 1, 'b'),
            (2, 1, 'c');
        "#,
    );
    let rs = db.run_report(Report::LikeToCommentRatio).unwrap();

    assert_eq!(rs.len(), 3);
    // ava 6/2, ben 1/1, cal 4 likes and no comments -> 0, not null
    assert_eq!(ints(&rs, "id"), vec![1, 2, 3]);
    let ratios: Vec<f64> = rs
        .column_values("like_to_comment_ratio")
        .iter()
        .map(|v| v.as_f64().expect("ratio must be numeric, never null"))
        .collect();
    assert_eq!(ratios, vec![3.0, 1.0, 0.0]);
}

#[test]
fn follower_surplus_counts_each_side_separately() {
    let db = db_with(
        r#"
        INSERT INTO users (id, username) VALUES (1,'ava'), (2,'ben'), (3,'cal');
        INSERT INTO follows (follower_id, followee_id) VALUES (2,1), (3,1);
        "#,
    );
    let rs = db.run_report(Report::MoreFollowersThanFollowing).unwrap();

    assert_eq!(ints(&rs, "id"), vec![1]);
    assert_eq!(ints(&rs, "followers_count"), vec![2]);
    assert_eq!(ints(&rs, "followees_count"), vec![0]);
}

#[test]
fn unique_tags_requires_a_tag_no_other_user_touches() {
    let db = db_with(
        r#"
        INSERT INTO users (id, username) VALUES (1,'ava'), (2,'ben');
        INSERT INTO photos (id, user_id, image_url) VALUES
            (1, 1, 'p1.jpg'), (2, 2, 'p2.jpg');
        INSERT INTO tags (id, tag_name) VALUES (1,'sunset'), (2,'beach');
        INSERT INTO photo_tags (photo_id, tag_id) VALUES
            (1, 1), (1, 2),
            (2, 2);
        "#,
    );
    let rs = db.run_report(Report::UniqueTags).unwrap();

    // sunset is ava's alone; ben only uses the shared beach tag
    assert_eq!(ints(&rs, "id"), vec![1]);
}

#[test]
fn tag_contribution_counts_pairs_in_descending_order() {
    let db = db_with(
        r#"
        INSERT INTO users (id, username) VALUES (1,'ava'), (2,'ben');
        INSERT INTO photos (id, user_id, image_url) VALUES
            (1, 1, 'p1.jpg'), (2, 1, 'p2.jpg'), (3, 2, 'p3.jpg');
        INSERT INTO tags (id, tag_name) VALUES (1,'sunset'), (2,'beach');
        INSERT INTO photo_tags (photo_id, tag_id) VALUES
            (1, 1), (2, 1),
            (1, 2),
            (3, 1);
        "#,
    );
    let rs = db.run_report(Report::TagContribution).unwrap();

    assert_eq!(rs.len(), 3);
    let contributions = ints(&rs, "tag_contribution");
    assert_eq!(contributions, vec![2, 1, 1]);
    // the leading row is ava's two sunset photos
    assert_eq!(rs.get(0, "id").unwrap().as_i64(), Some(1));
    assert_eq!(rs.get(0, "tag_name").unwrap().as_str(), Some("sunset"));
}

#[test]
fn mutual_follows_emits_one_canonical_row_per_pair() {
    let db = db_with(
        r#"
        INSERT INTO users (id, username) VALUES (1,'ava'), (2,'ben'), (3,'cal');
        INSERT INTO follows (follower_id, followee_id) VALUES
            (1,2), (2,1),
            (2,3), (3,2),
            (1,3);
        "#,
    );
    let rs = db.run_report(Report::MutualFollows).unwrap();

    assert_eq!(rs.len(), 2);
    let followers = ints(&rs, "follower_id");
    let followees = ints(&rs, "followee_id");
    let mut pairs: Vec<(i64, i64)> = followers.into_iter().zip(followees).collect();
    pairs.sort();
    assert_eq!(pairs, vec![(1, 2), (2, 3)]);
    for (a, b) in pairs {
        assert!(a < b);
    }
}

#[test]
fn mutual_follow_literal_scenario_orders_the_lower_id_first() {
    let db = db_with(
        r#"
        INSERT INTO users (id, username) VALUES (1,'ava'), (2,'ben');
        INSERT INTO follows (follower_id, followee_id) VALUES (1,2), (2,1);
        "#,
    );
    let rs = db.run_report(Report::MutualFollows).unwrap();

    assert_eq!(rs.len(), 1);
    assert_eq!(rs.get(0, "follower_id").unwrap().as_i64(), Some(1));
    assert_eq!(rs.get(0, "followee_id").unwrap().as_i64(), Some(2));
    assert_eq!(rs.get(0, "follower_name").unwrap().as_str(), Some("ava"));
    assert_eq!(rs.get(0, "followee_name").unwrap().as_str(), Some("ben"));
}

#[test]
fn like_ranks_are_dense_and_complete_up_to_five() {
    // seven photos, counts 10,9,9,8,7,6,5 -> dense ranks 1,2,2,3,4,5,6
    let mut seed = String::from(
        "INSERT INTO users (id, username) VALUES (1,'ava');\n",
    );
    let counts = [10i64, 9, 9, 8, 7, 6, 5];
    for (idx, count) in counts.iter().enumerate() {
        let photo_id = idx as i64 + 1;
        seed.push_str(&format!(
            "INSERT INTO photos (id, user_id, image_url) VALUES ({}, 1, 'p{}.jpg');\n",
            photo_id, photo_id
        ));
        for _ in 0..*count {
            seed.push_str(&format!(
                "INSERT INTO likes (user_id, photo_id) VALUES (1, {});\n",
                photo_id
            ));
        }
    }
    let db = db_with(&seed);
    let rs = db.run_report(Report::PhotoLikeRanks).unwrap();

    // everything with dense rank <= 5 and nothing else
    assert_eq!(rs.len(), 6);
    assert!(ints(&rs, "photo_rank").iter().all(|&r| r <= 5));
    assert!(!ints(&rs, "photo_id").contains(&7));

    let rank_of = |photo: i64| -> i64 {
        let photos = ints(&rs, "photo_id");
        let ranks = ints(&rs, "photo_rank");
        let pos = photos.iter().position(|&p| p == photo).unwrap();
        ranks[pos]
    };
    assert_eq!(rank_of(2), rank_of(3));
    assert_eq!(rank_of(4), rank_of(2) + 1);
}

#[test]
fn most_liked_and_unliked_literal_scenario() {
    let db = db_with(
        r#"
        INSERT INTO users (id, username) VALUES (1,'ava'), (2,'ben'), (9,'owner');
        INSERT INTO photos (id, user_id, image_url) VALUES
            (1, 9, 'p1.jpg'), (2, 9, 'p2.jpg'), (3, 9, 'p3.jpg');
        INSERT INTO likes (user_id, photo_id) VALUES (1,1), (2,1), (1,2);
        "#,
    );

    let most = db.run_report(Report::MostLikedPhoto).unwrap();
    assert_eq!(most.len(), 1);
    assert_eq!(most.get(0, "photo_id").unwrap().as_i64(), Some(1));
    assert_eq!(most.get(0, "likes_count").unwrap().as_i64(), Some(2));

    let unliked = db.run_report(Report::PhotosWithoutLikes).unwrap();
    assert_eq!(ints(&unliked, "id"), vec![3]);
}

#[test]
fn most_liked_includes_every_tie() {
    let db = db_with(
        r#"
        INSERT INTO users (id, username) VALUES (1,'ava'), (2,'ben'), (9,'owner');
        INSERT INTO photos (id, user_id, image_url) VALUES
            (1, 9, 'p1.jpg'), (2, 9, 'p2.jpg'), (3, 9, 'p3.jpg');
        INSERT INTO likes (user_id, photo_id) VALUES
            (1,1), (2,1),
            (1,2), (2,2),
            (1,3);
        "#,
    );
    let rs = db.run_report(Report::MostLikedPhoto).unwrap();

    let mut photos = ints(&rs, "photo_id");
    photos.sort();
    assert_eq!(photos, vec![1, 2]);
}

#[test]
fn per_photo_like_average_is_the_like_count_itself() {
    let db = db_with(
        r#"
        INSERT INTO users (id, username) VALUES (1,'ava'), (9,'owner');
        INSERT INTO photos (id, user_id, image_url) VALUES
            (1, 9, 'p1.jpg'), (2, 9, 'p2.jpg'), (3, 9, 'p3.jpg');
        INSERT INTO likes (user_id, photo_id) VALUES
            (1,1), (1,1), (1,1),
            (1,2);
        "#,
    );
    let rs = db.run_report(Report::AverageLikesPerPhoto).unwrap();

    // grouping is per photo, so the "average" is the raw count; the
    // zero-like photo falls out of the inner join entirely
    assert_eq!(rs.len(), 2);
    let avg_of = |photo: i64| -> f64 {
        let photos = ints(&rs, "photo_id");
        let pos = photos.iter().position(|&p| p == photo).unwrap();
        rs.rows[pos][rs.column_index("avg_likes_per_photo").unwrap()]
            .as_f64()
            .unwrap()
    };
    assert_eq!(avg_of(1), 3.0);
    assert_eq!(avg_of(2), 1.0);
    assert!(!ints(&rs, "photo_id").contains(&3));
}

#[test]
fn multi_tagged_needs_more_than_four_tags() {
    let mut seed = String::from(
        "INSERT INTO users (id, username) VALUES (1,'ava');
         INSERT INTO photos (id, user_id, image_url) VALUES (1, 1, 'p1.jpg'), (2, 1, 'p2.jpg');\n",
    );
    for tag_id in 1..=9i64 {
        seed.push_str(&format!(
            "INSERT INTO tags (id, tag_name) VALUES ({}, 'tag{}');\n",
            tag_id, tag_id
        ));
    }
    // photo 1 carries five tags, photo 2 only four
    for tag_id in 1..=5i64 {
        seed.push_str(&format!(
            "INSERT INTO photo_tags (photo_id, tag_id) VALUES (1, {});\n",
            tag_id
        ));
    }
    for tag_id in 6..=9i64 {
        seed.push_str(&format!(
            "INSERT INTO photo_tags (photo_id, tag_id) VALUES (2, {});\n",
            tag_id
        ));
    }
    let db = db_with(&seed);
    let rs = db.run_report(Report::MultiTaggedPhotos).unwrap();

    assert_eq!(ints(&rs, "id"), vec![1]);
    assert_eq!(ints(&rs, "tags_count"), vec![5]);
}

#[test]
fn top_commented_is_a_plain_row_cap() {
    // six photos with comment counts 6..1: the cap keeps five rows
    let mut seed = String::from(
        "INSERT INTO users (id, username) VALUES (1,'ava');\n",
    );
    for photo_id in 1..=6i64 {
        seed.push_str(&format!(
            "INSERT INTO photos (id, user_id, image_url) VALUES ({}, 1, 'p{}.jpg');\n",
            photo_id, photo_id
        ));
        for _ in 0..(7 - photo_id) {
            seed.push_str(&format!(
                "INSERT INTO comments (user_id, photo_id, comment_text) VALUES (1, {}, 'c');\n",
                photo_id
            ));
        }
    }
    let db = db_with(&seed);
    let rs = db.run_report(Report::TopCommentedPhotos).unwrap();

    assert_eq!(rs.len(), 5);
    assert_eq!(ints(&rs, "comments_count"), vec![6, 5, 4, 3, 2]);
    assert_eq!(ints(&rs, "photo_rank"), vec![1, 2, 3, 4, 5]);
}

#[test]
fn top_commented_splits_a_boundary_tie() {
    // six photos all tied at one comment: rank 1 across the board, but the
    // cap still returns exactly five rows
    let mut seed = String::from(
        "INSERT INTO users (id, username) VALUES (1,'ava');\n",
    );
    for photo_id in 1..=6i64 {
        seed.push_str(&format!(
            "INSERT INTO photos (id, user_id, image_url) VALUES ({}, 1, 'p{}.jpg');\n",
            photo_id, photo_id
        ));
        seed.push_str(&format!(
            "INSERT INTO comments (user_id, photo_id, comment_text) VALUES (1, {}, 'c');\n",
            photo_id
        ));
    }
    let db = db_with(&seed);
    let rs = db.run_report(Report::TopCommentedPhotos).unwrap();

    assert_eq!(rs.len(), 5);
    assert!(ints(&rs, "photo_rank").iter().all(|&r| r == 1));
}

#[test]
fn engagement_defaults_missing_sides_to_zero() {
    let db = db_with(
        r#"
        INSERT INTO users (id, username) VALUES (1,'ava'), (9,'owner');
        INSERT INTO photos (id, user_id, image_url) VALUES
            (1, 9, 'p1.jpg'), (2, 9, 'p2.jpg'), (3, 9, 'p3.jpg'), (4, 9, 'p4.jpg');
        INSERT INTO likes (user_id, photo_id) VALUES (1,1), (1,1), (1,3);
        INSERT INTO comments (user_id, photo_id, comment_text) VALUES
            (1, 1, 'a'),
            (1, 2, 'b'), (1, 2, 'c');
        "#,
    );
    let rs = db.run_report(Report::TopEngagementPhotos).unwrap();

    // p1 = 2+1, p2 = 0+2, p3 = 1+0, p4 = 0+0
    assert_eq!(ints(&rs, "id"), vec![1, 2, 3, 4]);
    assert_eq!(ints(&rs, "total_engagement"), vec![3, 2, 1, 0]);
}

#[test]
fn similar_tags_needs_three_shared_and_canonical_order() {
    let db = db_with(
        r#"
        INSERT INTO users (id, username) VALUES (1,'ava');
        INSERT INTO photos (id, user_id, image_url) VALUES
            (1, 1, 'p1.jpg'), (2, 1, 'p2.jpg'), (3, 1, 'p3.jpg');
        INSERT INTO tags (id, tag_name) VALUES
            (1,'sunset'), (2,'beach'), (3,'surf'), (4,'dunes');
        INSERT INTO photo_tags (photo_id, tag_id) VALUES
            (1, 1), (1, 2), (1, 3), (1, 4),
            (2, 1), (2, 2), (2, 3),
            (3, 1), (3, 2);
        "#,
    );
    let rs = db.run_report(Report::SimilarTagPhotos).unwrap();

    // photos 1 and 2 share three tags; photo 3 shares only two with either
    assert_eq!(rs.len(), 1);
    let a = rs.get(0, "photo_id").unwrap().as_i64().unwrap();
    let b = rs.get(0, "similar_photo_id").unwrap().as_i64().unwrap();
    assert!(a < b);
    assert_eq!((a, b), (1, 2));
}

#[test]
fn every_report_runs_on_an_empty_database() {
    let db = db_with("");
    for report in Report::ALL {
        let rs = db.run_report(report).unwrap();
        assert!(rs.is_empty(), "{} on empty data", report.key());
    }
}

#[test]
fn raw_passthrough_shares_the_execution_primitive() {
    let db = db_with(
        r#"
        INSERT INTO users (id, username) VALUES (1,'ava'), (2,'ben');
        INSERT INTO follows (follower_id, followee_id) VALUES (2,1);
        "#,
    );
    let via_report = db.run_report(Report::MostFollowers).unwrap();
    let via_raw = db
        .run_sql(Report::MostFollowers.sql(db.dialect()))
        .unwrap();
    assert_eq!(via_report.columns, via_raw.columns);
    assert_eq!(via_report.len(), via_raw.len());
}
