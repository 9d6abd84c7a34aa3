//! Option commands

use super::{check_field_index, check_option_index, Context};
use crate::OptionCommands;

pub async fn handle(action: OptionCommands, ctx: &Context) -> anyhow::Result<()> {
    match action {
        OptionCommands::Add { form_id, field_index, label } => {
            let mut form = ctx.open_form(&form_id).await?;
            check_field_index(&form, field_index)?;
            let field_type = form.fields()[field_index].field_type();
            if !field_type.is_choice() {
                anyhow::bail!("field #{} is a {} field and takes no options", field_index, field_type);
            }
            let option_index = form.add_option(field_index);
            form.update_option_label(field_index, option_index, label);
            ctx.save_and_show(&form).await
        }
        OptionCommands::Update { form_id, field_index, option_index, label } => {
            let mut form = ctx.open_form(&form_id).await?;
            check_option_index(&form, field_index, option_index)?;
            form.update_option_label(field_index, option_index, label);
            ctx.save_and_show(&form).await
        }
        OptionCommands::Remove { form_id, field_index, option_index } => {
            let mut form = ctx.open_form(&form_id).await?;
            check_option_index(&form, field_index, option_index)?;
            form.remove_option(field_index, option_index);
            ctx.save_and_show(&form).await
        }
    }
}
