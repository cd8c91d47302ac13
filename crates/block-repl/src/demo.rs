//! A hand-built demo project, standing in for the loader this crate
//! deliberately doesn't ship. Mirrors the fallback project the
//! source's `main()` builds when no project path is given: one sprite,
//! one green-flag script.

use block_model::builder::{block, expr, hat, num, script, text};
use block_model::{Command, Costume, Project, Sprite};

pub fn build() -> Project {
    let mut project = Project::new();

    let mut sprite = Sprite::new("Sprite1");
    sprite.core.costumes.push(Costume {
        name: "square".into(),
        rotation_center: (30.0, 30.0),
        size: (60.0, 60.0),
    });

    let walk_forever = hat(
        Command::WhenGreenFlag,
        vec![],
    );
    let body = vec![
        block(Command::MoveSteps, vec![num(10.0)]),
        block(
            Command::TurnRight,
            vec![num(15.0)],
        ),
        block(Command::Say, vec![expr(block(Command::XPosition, vec![]))]),
        block(Command::WaitSecs, vec![num(0.5)]),
    ];
    let forever = block(Command::Forever, vec![block_model::builder::body(body)]);

    sprite.core.scripts.push(script(vec![walk_forever, forever]));
    sprite.core.scripts.push(script(vec![
        hat(Command::WhenKeyPressed, vec![text("space")]),
        block(Command::ChangeEffectBy, vec![text("ghost"), num(10.0)]),
    ]));

    project.add_sprite(sprite);
    project
}
