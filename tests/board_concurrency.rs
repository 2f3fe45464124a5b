#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use projectstack::api::{RepositoryError, RepositoryResult, TaskRepository};
    use projectstack::libs::board::{BoardError, BoardEvent, BoardMutator, Operation};
    use projectstack::libs::task::{Comment, Member, Task, TaskDraft, TaskPatch, TaskStatus};
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Repository whose task calls block until the test opens that task's gate.
    #[derive(Default)]
    struct GatedRepository {
        gates: Mutex<HashMap<String, Arc<Notify>>>,
        failing: Mutex<HashSet<String>>,
    }

    impl GatedRepository {
        fn gate(&self, task_id: &str) -> Arc<Notify> {
            self.gates.lock().entry(task_id.to_owned()).or_default().clone()
        }

        fn open(&self, task_id: &str) {
            self.gate(task_id).notify_one();
        }

        fn fail(&self, task_id: &str) {
            self.failing.lock().insert(task_id.to_owned());
        }

        fn outcome(&self, task_id: &str) -> RepositoryResult<()> {
            if self.failing.lock().contains(task_id) {
                return Err(RepositoryError::Server { status: 500 });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TaskRepository for GatedRepository {
        async fn list(&self, _project_id: &str) -> RepositoryResult<Vec<Task>> {
            Ok(Vec::new())
        }

        async fn create(&self, _project_id: &str, draft: &TaskDraft) -> RepositoryResult<Task> {
            Ok(Task::new("new", &draft.title).with_status(draft.status.clone()))
        }

        async fn remove(&self, _project_id: &str, task_id: &str) -> RepositoryResult<()> {
            let gate = self.gate(task_id);
            gate.notified().await;
            self.outcome(task_id)
        }

        async fn update(&self, _project_id: &str, task_id: &str, patch: &TaskPatch) -> RepositoryResult<Task> {
            let gate = self.gate(task_id);
            gate.notified().await;
            self.outcome(task_id)?;
            let mut task = Task::new(task_id, "server copy");
            patch.apply(&mut task);
            Ok(task)
        }

        async fn list_comments(&self, _project_id: &str, _task_id: &str) -> RepositoryResult<Vec<Comment>> {
            Ok(Vec::new())
        }

        async fn add_comment(&self, _project_id: &str, task_id: &str, text: &str) -> RepositoryResult<Comment> {
            Ok(Comment {
                id: format!("{}-c", task_id),
                text: text.to_owned(),
                author: None,
                created_at: None,
            })
        }

        async fn remove_comment(&self, _project_id: &str, _task_id: &str, _comment_id: &str) -> RepositoryResult<()> {
            Ok(())
        }
    }

    fn seeded(repository: Arc<GatedRepository>) -> BoardMutator<GatedRepository> {
        let tasks = vec![Task::new("a", "Write docs"), Task::new("b", "Fix login"), Task::new("c", "Plan sprint")];
        BoardMutator::with_tasks(repository, "p-1", tasks)
    }

    async fn eventually(mut condition: impl FnMut() -> bool) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while !condition() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("condition was not reached in time");
    }

    fn status_of(board: &BoardMutator<GatedRepository>, task_id: &str) -> TaskStatus {
        board.task(task_id).map(|task| task.status).unwrap_or_default()
    }

    #[tokio::test]
    async fn test_overlapping_changes_on_different_tasks_both_land() {
        let repository = Arc::new(GatedRepository::default());
        let board = seeded(repository.clone());

        let moving = tokio::spawn({
            let board = board.clone();
            async move { board.move_task("a", TaskStatus::Done).await }
        });
        let assigning = tokio::spawn({
            let board = board.clone();
            async move { board.assign("b", Some(Member::named("Ada"))).await }
        });

        eventually(|| status_of(&board, "a") == TaskStatus::Done && board.task("b").is_some_and(|t| t.assignee.is_some())).await;

        repository.open("b");
        repository.open("a");
        assert!(assigning.await.unwrap().is_ok());
        assert!(moving.await.unwrap().is_ok());

        assert_eq!(status_of(&board, "a"), TaskStatus::Done);
        assert_eq!(board.task("b").unwrap().assignee, Some(Member::named("Ada")));
        assert_eq!(board.snapshot().len(), 3);
    }

    #[tokio::test]
    async fn test_rollback_of_one_task_keeps_the_other_change() {
        let repository = Arc::new(GatedRepository::default());
        repository.fail("a");
        let board = seeded(repository.clone());

        let moving = tokio::spawn({
            let board = board.clone();
            async move { board.move_task("a", TaskStatus::InProgress).await }
        });
        let moving_other = tokio::spawn({
            let board = board.clone();
            async move { board.move_task("c", TaskStatus::Done).await }
        });
        eventually(|| status_of(&board, "a") == TaskStatus::InProgress && status_of(&board, "c") == TaskStatus::Done).await;

        repository.open("a");
        let error = moving.await.unwrap().unwrap_err();
        assert_eq!(error.operation(), Some(&Operation::Move("a".to_string())));
        assert_eq!(status_of(&board, "a"), TaskStatus::Todo);
        assert_eq!(status_of(&board, "c"), TaskStatus::Done);

        repository.open("c");
        assert!(moving_other.await.unwrap().is_ok());
        assert_eq!(status_of(&board, "c"), TaskStatus::Done);
    }

    #[tokio::test]
    async fn test_failed_delete_restores_position_despite_other_changes() {
        let repository = Arc::new(GatedRepository::default());
        repository.fail("a");
        let board = seeded(repository.clone());

        let deleting = tokio::spawn({
            let board = board.clone();
            async move { board.delete("a").await }
        });
        eventually(|| board.task("a").is_none()).await;

        let moving = tokio::spawn({
            let board = board.clone();
            async move { board.move_task("b", TaskStatus::Done).await }
        });
        repository.open("b");
        assert!(moving.await.unwrap().is_ok());

        repository.open("a");
        let error = deleting.await.unwrap().unwrap_err();
        assert!(matches!(error, BoardError::Repository { .. }));

        let ids: Vec<_> = board.snapshot().iter().map(|task| task.id.clone()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(status_of(&board, "b"), TaskStatus::Done);
    }

    #[tokio::test]
    async fn test_dropping_the_caller_does_not_cancel_reconciliation() {
        let repository = Arc::new(GatedRepository::default());
        repository.fail("a");
        let board = seeded(repository.clone());
        let mut events = board.subscribe();

        let abandoned = tokio::time::timeout(Duration::from_millis(20), board.move_task("a", TaskStatus::Done)).await;
        assert!(abandoned.is_err());
        assert_eq!(status_of(&board, "a"), TaskStatus::Done);

        repository.open("a");
        loop {
            match tokio::time::timeout(Duration::from_secs(2), events.recv()).await {
                Ok(Ok(BoardEvent::RolledBack(operation))) => {
                    assert_eq!(operation, Operation::Move("a".to_string()));
                    break;
                }
                Ok(Ok(_)) => continue,
                other => panic!("no rollback event: {:?}", other.map(|result| result.is_ok())),
            }
        }
        assert_eq!(status_of(&board, "a"), TaskStatus::Todo);
    }

    #[tokio::test]
    async fn test_subscribers_see_optimistic_change_then_revert() {
        let repository = Arc::new(GatedRepository::default());
        repository.fail("b");
        repository.open("b");
        let board = seeded(repository.clone());
        let mut events = board.subscribe();

        assert!(board.move_task("b", TaskStatus::Done).await.is_err());

        match events.recv().await.unwrap() {
            BoardEvent::Changed(task) => assert_eq!(task.status, TaskStatus::Done),
            event => panic!("unexpected event {:?}", event),
        }
        match events.recv().await.unwrap() {
            BoardEvent::Changed(task) => assert_eq!(task.status, TaskStatus::Todo),
            event => panic!("unexpected event {:?}", event),
        }
        assert!(matches!(events.recv().await.unwrap(), BoardEvent::RolledBack(Operation::Move(id)) if id == "b"));
    }

    #[tokio::test]
    async fn test_create_appends_after_existing_tasks() {
        let board = seeded(Arc::new(GatedRepository::default()));
        let created = board.create(TaskDraft::new("  Review PR  ")).await.unwrap();

        assert_eq!(created.title, "Review PR");
        assert_eq!(board.snapshot().last().map(|task| task.id.as_str()), Some("new"));
    }
}
